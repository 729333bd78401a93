//! Technique module - actions performed from a position, and their outcomes

use crate::position::MediaReference;
use crate::{PositionId, TechniqueId};

/// Whether a technique works with the Gi, without it, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applicability {
    /// Requires Gi grips
    Gi,

    /// No-Gi specific
    NoGi,

    /// Works either way
    Both,
}

impl Applicability {
    /// All values in declaration order
    pub const ALL: [Applicability; 3] = [Applicability::Gi, Applicability::NoGi, Applicability::Both];

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Gi => "Gi",
            Applicability::NoGi => "No-Gi",
            Applicability::Both => "Both",
        }
    }

    /// Parse an applicability (`gi`, `no-gi`, `nogi`, `both`)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|value| crate::vocab::matches(s, value.as_str()))
    }
}

/// Difficulty level of a technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// Typically learned in the first one or two years
    Beginner,

    /// Requires a solid fundamental base
    Intermediate,

    /// Requires timing and experience
    Advanced,
}

impl Difficulty {
    /// All values, easiest first
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Parse a difficulty (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|value| crate::vocab::matches(s, value.as_str()))
    }
}

/// Primary purpose of a technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueType {
    /// Joint locks and chokes
    Submission,

    /// Reversal from bottom to top
    Sweep,

    /// Getting out of a bad position
    Escape,

    /// Moving between positions
    Transition,

    /// Maintaining a position or grip configuration
    Control,

    /// Taking the exchange from standing to the ground
    Takedown,

    /// Getting past the opponent's legs
    GuardPass,

    /// Regaining guard from a worse position
    GuardRecovery,
}

impl TechniqueType {
    /// All values in declaration order
    pub const ALL: [TechniqueType; 8] = [
        TechniqueType::Submission,
        TechniqueType::Sweep,
        TechniqueType::Escape,
        TechniqueType::Transition,
        TechniqueType::Control,
        TechniqueType::Takedown,
        TechniqueType::GuardPass,
        TechniqueType::GuardRecovery,
    ];

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            TechniqueType::Submission => "Submission",
            TechniqueType::Sweep => "Sweep",
            TechniqueType::Escape => "Escape",
            TechniqueType::Transition => "Transition",
            TechniqueType::Control => "Control",
            TechniqueType::Takedown => "Takedown",
            TechniqueType::GuardPass => "Guard Pass",
            TechniqueType::GuardRecovery => "Guard Recovery",
        }
    }

    /// Parse a technique type (`guard-pass`, `GuardPass` and `Guard Pass` all work)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|value| crate::vocab::matches(s, value.as_str()))
    }

    /// True for types that move the participants to another position
    ///
    /// Everything except `Submission` and `Control` is positional.
    pub fn is_positional(&self) -> bool {
        !matches!(self, TechniqueType::Submission | TechniqueType::Control)
    }
}

/// Nature of a technique outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// The participants end in another position
    PositionChange,

    /// The exchange ends with a submission
    Submission,

    /// Grips or control change without a new position
    ControlChange,

    /// The exchange resets
    Reset,

    /// The attempt fails
    Failure,

    /// The opponent counters
    Countered,
}

impl OutcomeKind {
    /// All values in declaration order
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::PositionChange,
        OutcomeKind::Submission,
        OutcomeKind::ControlChange,
        OutcomeKind::Reset,
        OutcomeKind::Failure,
        OutcomeKind::Countered,
    ];

    /// Get the name used in knowledge-base files
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::PositionChange => "PositionChange",
            OutcomeKind::Submission => "Submission",
            OutcomeKind::ControlChange => "ControlChange",
            OutcomeKind::Reset => "Reset",
            OutcomeKind::Failure => "Failure",
            OutcomeKind::Countered => "Countered",
        }
    }

    /// Parse an outcome kind (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|value| crate::vocab::matches(s, value.as_str()))
    }
}

/// How common an outcome is; descriptive only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Likelihood {
    /// The expected result
    Primary,

    /// A frequent alternative
    Secondary,

    /// Happens occasionally
    Possible,

    /// The usual counter
    CommonCounter,
}

impl Likelihood {
    /// All values in declaration order
    pub const ALL: [Likelihood; 4] = [
        Likelihood::Primary,
        Likelihood::Secondary,
        Likelihood::Possible,
        Likelihood::CommonCounter,
    ];

    /// Get the name used in knowledge-base files
    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Primary => "Primary",
            Likelihood::Secondary => "Secondary",
            Likelihood::Possible => "Possible",
            Likelihood::CommonCounter => "CommonCounter",
        }
    }

    /// Parse a likelihood tag (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|value| crate::vocab::matches(s, value.as_str()))
    }
}

macro_rules! vocabulary_traits {
    ($($ty:ident),* $(,)?) => {
        $(
            impl std::str::FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse(s).ok_or_else(|| format!("Invalid {}: {}", stringify!($ty), s))
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

vocabulary_traits!(Applicability, Difficulty, TechniqueType, OutcomeKind, Likelihood);

/// One possible result of attempting a technique
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueOutcome {
    /// Nature of the result
    pub kind: OutcomeKind,

    /// Resulting position, if the outcome is positional
    ///
    /// Submission outcomes usually leave this empty: they are terminal.
    pub end_position_id: Option<PositionId>,

    /// What happens
    pub description: String,

    /// How common the outcome is
    pub likelihood: Option<Likelihood>,

    /// Opponent technique producing a `Countered` outcome
    pub countered_by_technique_id: Option<TechniqueId>,
}

impl TechniqueOutcome {
    /// Outcome moving to `end_position_id`
    pub fn position_change(end_position_id: impl Into<PositionId>, description: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::PositionChange,
            end_position_id: Some(end_position_id.into()),
            description: description.into(),
            likelihood: None,
            countered_by_technique_id: None,
        }
    }

    /// Terminal submission outcome with no end position
    pub fn submission(description: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Submission,
            end_position_id: None,
            description: description.into(),
            likelihood: None,
            countered_by_technique_id: None,
        }
    }

    /// Outcome of an arbitrary kind
    pub fn new(kind: OutcomeKind, end_position_id: Option<PositionId>, description: impl Into<String>) -> Self {
        Self {
            kind,
            end_position_id,
            description: description.into(),
            likelihood: None,
            countered_by_technique_id: None,
        }
    }

    /// Set the likelihood tag
    pub fn with_likelihood(mut self, likelihood: Likelihood) -> Self {
        self.likelihood = Some(likelihood);
        self
    }
}

/// An action initiated from exactly one position
#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    /// Unique identifier
    pub id: TechniqueId,

    /// Display name
    pub name: String,

    /// Setup, execution and finishing details
    pub description: String,

    /// Alternative names
    pub aliases: Vec<String>,

    /// Gi / No-Gi / Both
    pub applicability: Applicability,

    /// Beginner / Intermediate / Advanced
    pub difficulty: Difficulty,

    /// Primary purpose
    pub technique_type: TechniqueType,

    /// Position the technique starts from
    pub origin_position_id: PositionId,

    /// Possible results, in declaration order
    pub outcomes: Vec<TechniqueOutcome>,

    /// Opponent techniques that commonly counter this one
    pub countered_by_technique_ids: Vec<TechniqueId>,

    /// Techniques commonly chained afterwards
    pub follow_up_technique_ids: Vec<TechniqueId>,

    /// Techniques that commonly set this one up
    pub setup_technique_ids: Vec<TechniqueId>,

    /// Illustrations
    pub media: Vec<MediaReference>,

    /// Step-by-step instructions
    pub steps: Vec<String>,

    /// Variations, common mistakes, strategy
    pub notes: Option<String>,
}

impl Technique {
    /// Create a beginner, Gi-and-No-Gi technique without outcomes
    pub fn new(
        id: impl Into<TechniqueId>,
        name: impl Into<String>,
        technique_type: TechniqueType,
        origin_position_id: impl Into<PositionId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            aliases: Vec::new(),
            applicability: Applicability::Both,
            difficulty: Difficulty::Beginner,
            technique_type,
            origin_position_id: origin_position_id.into(),
            outcomes: Vec::new(),
            countered_by_technique_ids: Vec::new(),
            follow_up_technique_ids: Vec::new(),
            setup_technique_ids: Vec::new(),
            media: Vec::new(),
            steps: Vec::new(),
            notes: None,
        }
    }

    /// Set the difficulty
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the applicability
    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    /// Append an outcome
    pub fn with_outcome(mut self, outcome: TechniqueOutcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    /// Append setup technique ids
    pub fn with_setups<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TechniqueId>,
    {
        self.setup_technique_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Outcomes that name an end position, with their declaration index
    pub fn positional_outcomes(&self) -> impl Iterator<Item = (usize, &PositionId)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.end_position_id.as_ref().map(|end| (index, end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_types() {
        let positional: Vec<_> = TechniqueType::ALL
            .into_iter()
            .filter(TechniqueType::is_positional)
            .collect();

        assert_eq!(
            positional,
            vec![
                TechniqueType::Sweep,
                TechniqueType::Escape,
                TechniqueType::Transition,
                TechniqueType::Takedown,
                TechniqueType::GuardPass,
                TechniqueType::GuardRecovery,
            ]
        );
        assert!(!TechniqueType::Submission.is_positional());
        assert!(!TechniqueType::Control.is_positional());
    }

    #[test]
    fn test_vocabulary_parsing() {
        assert_eq!(Applicability::parse("no-gi"), Some(Applicability::NoGi));
        assert_eq!(Applicability::parse("NoGi"), Some(Applicability::NoGi));
        assert_eq!(Difficulty::parse("advanced"), Some(Difficulty::Advanced));
        assert_eq!(TechniqueType::parse("guard-pass"), Some(TechniqueType::GuardPass));
        assert_eq!(TechniqueType::parse("Guard Recovery"), Some(TechniqueType::GuardRecovery));
        assert_eq!(OutcomeKind::parse("position-change"), Some(OutcomeKind::PositionChange));
        assert_eq!(Likelihood::parse("commoncounter"), Some(Likelihood::CommonCounter));
        assert!("strangle".parse::<TechniqueType>().is_err());
    }

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(Applicability::NoGi.to_string(), "No-Gi");
        assert_eq!(TechniqueType::GuardPass.to_string(), "Guard Pass");
        assert_eq!(Difficulty::Intermediate.to_string(), "Intermediate");
    }

    #[test]
    fn test_positional_outcomes_keep_declaration_index() {
        let technique = Technique::new("cg-armbar", "Armbar", TechniqueType::Submission, "closed-guard-bottom")
            .with_outcome(TechniqueOutcome::submission("Opponent taps"))
            .with_outcome(TechniqueOutcome::new(
                OutcomeKind::Failure,
                Some(PositionId::from("closed-guard-bottom")),
                "Arm is pulled out",
            ))
            .with_outcome(TechniqueOutcome::position_change("mount-top", "Opponent stacks and falls"));

        let positional: Vec<_> = technique
            .positional_outcomes()
            .map(|(index, end)| (index, end.as_str()))
            .collect();
        assert_eq!(positional, vec![(1, "closed-guard-bottom"), (2, "mount-top")]);
    }

    #[test]
    fn test_technique_defaults() {
        let technique = Technique::new("pull", "Guard Pull", TechniqueType::Transition, "standing");
        assert_eq!(technique.applicability, Applicability::Both);
        assert_eq!(technique.difficulty, Difficulty::Beginner);
        assert!(technique.outcomes.is_empty());
        assert!(technique.setup_technique_ids.is_empty());
    }
}
