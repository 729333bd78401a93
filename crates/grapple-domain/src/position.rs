//! Position module - the nodes of the grappling graph

use crate::{PositionId, TechniqueId};

/// Qualitative assessment of a position, from the named participant's view
///
/// Variants are declared from best to worst, so `Ord` ranks them:
/// `Advantage::Dominant < Advantage::Inferior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Advantage {
    /// Clear control with many attacking options
    Dominant,

    /// Favourable but contestable
    Advantageous,

    /// Neither participant is favoured
    Neutral,

    /// Unfavourable but recoverable
    Disadvantageous,

    /// Clearly losing; escape is the priority
    Inferior,
}

impl Advantage {
    /// All ratings, best first
    pub const ALL: [Advantage; 5] = [
        Advantage::Dominant,
        Advantage::Advantageous,
        Advantage::Neutral,
        Advantage::Disadvantageous,
        Advantage::Inferior,
    ];

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Advantage::Dominant => "Dominant",
            Advantage::Advantageous => "Advantageous",
            Advantage::Neutral => "Neutral",
            Advantage::Disadvantageous => "Disadvantageous",
            Advantage::Inferior => "Inferior",
        }
    }

    /// Parse a rating (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|advantage| crate::vocab::matches(s, advantage.as_str()))
    }
}

impl std::str::FromStr for Advantage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid advantage: {}", s))
    }
}

impl std::fmt::Display for Advantage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of external media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still image
    Image,

    /// Video clip
    Video,
}

impl MediaKind {
    /// Get the lowercase name used in knowledge-base files
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Parse a media kind (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// Reference to an image or video illustrating a position or technique
#[derive(Debug, Clone, PartialEq)]
pub struct MediaReference {
    /// Location of the media
    pub url: String,

    /// Image or video
    pub kind: MediaKind,

    /// Optional caption
    pub caption: Option<String>,

    /// Optional attribution
    pub source: Option<String>,
}

/// A named configuration of two participants, seen from one of them
///
/// `inverse_position_id` names the same configuration from the other
/// participant's view (symmetric and terminal states are their own inverse).
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Unique identifier
    pub id: PositionId,

    /// Display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Alternative names
    pub aliases: Vec<String>,

    /// Broader position this one is a variant of
    pub parent_id: Option<PositionId>,

    /// Named variants of this position
    pub variant_ids: Vec<PositionId>,

    /// True when this is a named variant of a broader position
    pub is_variant: bool,

    /// Qualitative rating
    pub advantage: Option<Advantage>,

    /// Illustrations
    pub media: Vec<MediaReference>,

    /// Techniques that can be initiated from here (may reference undefined ids)
    pub applicable_technique_ids: Vec<TechniqueId>,

    /// Same configuration from the other participant's view
    pub inverse_position_id: PositionId,
}

impl Position {
    /// Create a position with no techniques, variants or metadata
    pub fn new(
        id: impl Into<PositionId>,
        name: impl Into<String>,
        inverse_position_id: impl Into<PositionId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            aliases: Vec::new(),
            parent_id: None,
            variant_ids: Vec::new(),
            is_variant: false,
            advantage: None,
            media: Vec::new(),
            applicable_technique_ids: Vec::new(),
            inverse_position_id: inverse_position_id.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the advantage rating
    pub fn with_advantage(mut self, advantage: Advantage) -> Self {
        self.advantage = Some(advantage);
        self
    }

    /// Mark this position as a variant of `parent`
    pub fn variant_of(mut self, parent: impl Into<PositionId>) -> Self {
        self.parent_id = Some(parent.into());
        self.is_variant = true;
        self
    }

    /// Append applicable technique ids
    pub fn with_techniques<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TechniqueId>,
    {
        self.applicable_technique_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// True when the position names itself as its inverse
    pub fn is_self_inverse(&self) -> bool {
        self.inverse_position_id == self.id
    }
}
