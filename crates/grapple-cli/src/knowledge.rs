//! Knowledge base selection.

use crate::config::Config;
use crate::error::Result;
use grapple_domain::KnowledgeBase;
use std::path::Path;
use tracing::debug;

/// Load the knowledge base named on the command line, else the one in the
/// config file, else the bundled sample.
pub fn load(explicit: Option<&Path>, config: &Config) -> Result<KnowledgeBase> {
    let path = explicit.map(Path::to_path_buf).or_else(|| config.knowledge_base_path());

    let kb = match path {
        Some(path) => grapple_store::load_knowledge_base(&path)?,
        None => {
            debug!("No knowledge base configured, using the bundled sample");
            grapple_store::sample_knowledge_base()?
        }
    };
    Ok(kb)
}
