//! Grapple Knowledge Base Storage
//!
//! Loads knowledge bases from JSON or TOML files into the immutable
//! [`KnowledgeBase`] arena.
//!
//! # File shape
//!
//! ```json
//! {
//!   "positions": [
//!     { "id": "mount-top", "name": "Mount (Top)", "advantage": "Dominant",
//!       "applicableTechniqueIds": ["mount-top-armbar"], "inversePositionId": "mount-bottom" }
//!   ],
//!   "techniques": [
//!     { "id": "mount-top-armbar", "name": "Armbar", "applicability": "Both",
//!       "difficulty": "Beginner", "type": "Submission", "originPositionId": "mount-top",
//!       "outcomes": [{ "type": "Submission", "description": "Opponent taps" }] }
//!   ]
//! }
//! ```
//!
//! Positions and techniques are arrays so document order becomes insertion
//! order. Cross-references are not checked here; graph derivation skips the
//! ones that dangle.
//!
//! # Examples
//!
//! ```
//! let kb = grapple_store::sample_knowledge_base().unwrap();
//! assert!(kb.position("mount-top").is_some());
//! ```

#![warn(missing_docs)]

mod raw;

use grapple_domain::KnowledgeBase;
use raw::RawKnowledgeBase;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const SAMPLE_KNOWLEDGE_BASE: &str = include_str!("sample_knowledge_base.json");

/// Errors that can occur while loading a knowledge base
#[derive(Error, Debug)]
pub enum StoreError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or missing required field
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML or missing required field
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither `.json` nor `.toml`
    #[error("Unsupported knowledge base format: {0}")]
    UnsupportedFormat(String),

    /// A vocabulary field holds an unknown value
    #[error("Invalid {field} '{value}' on {entity}")]
    InvalidData {
        /// Owning entity, e.g. `technique 'mount-top-armbar'`
        entity: String,
        /// Field name as written in the file
        field: &'static str,
        /// Offending value
        value: String,
    },
}

/// Knowledge base file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl Format {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load a knowledge base file, choosing the format by extension
pub fn load_knowledge_base(path: impl AsRef<Path>) -> Result<KnowledgeBase, StoreError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;

    let kb = match format {
        Format::Json => from_json_str(&text)?,
        Format::Toml => from_toml_str(&text)?,
    };

    info!(
        path = %path.display(),
        positions = kb.position_count(),
        techniques = kb.technique_count(),
        "Loaded knowledge base"
    );
    Ok(kb)
}

/// Parse a knowledge base from JSON text
pub fn from_json_str(text: &str) -> Result<KnowledgeBase, StoreError> {
    let raw: RawKnowledgeBase = serde_json::from_str(text)?;
    debug!(bytes = text.len(), "Parsed JSON knowledge base");
    raw.into_knowledge_base()
}

/// Parse a knowledge base from TOML text (`[[positions]]` / `[[techniques]]` tables)
pub fn from_toml_str(text: &str) -> Result<KnowledgeBase, StoreError> {
    let raw: RawKnowledgeBase = toml::from_str(text)?;
    debug!(bytes = text.len(), "Parsed TOML knowledge base");
    raw.into_knowledge_base()
}

/// The knowledge base bundled with the crate
///
/// Covers standing, closed guard, mount and its variants, side control, back
/// control, half guard and turtle.
pub fn sample_knowledge_base() -> Result<KnowledgeBase, StoreError> {
    from_json_str(SAMPLE_KNOWLEDGE_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("kb.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("dir/KB.TOML")).unwrap(), Format::Toml);
        assert!(matches!(
            Format::from_path(Path::new("kb.yaml")),
            Err(StoreError::UnsupportedFormat(_))
        ));
        assert!(Format::from_path(Path::new("kb")).is_err());
    }

    #[test]
    fn test_sample_knowledge_base() {
        let kb = sample_knowledge_base().unwrap();
        let stats = kb.stats();

        assert_eq!(stats.positions, 20);
        assert_eq!(stats.techniques, 31);
        assert_eq!(stats.submissions, 11);

        let mount = kb.position("mount-top").unwrap();
        assert_eq!(kb.variants_of(mount).count(), 3);
        assert_eq!(kb.inverse_of(mount).map(|p| p.id.as_str()), Some("mount-bottom"));
    }

    #[test]
    fn test_invalid_data_message() {
        let err = StoreError::InvalidData {
            entity: "position 'mount-top'".to_string(),
            field: "advantage",
            value: "Winning".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid advantage 'Winning' on position 'mount-top'");
    }
}
