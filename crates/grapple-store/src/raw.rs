//! On-disk shape of a knowledge base file
//!
//! Field names follow the camelCase data format. Vocabulary values stay
//! strings here and are parsed into domain enums during conversion, so an
//! unknown value can be reported with the entity and field it came from.

use crate::StoreError;
use grapple_domain::{
    Advantage, Applicability, Difficulty, KnowledgeBase, Likelihood, MediaKind, MediaReference,
    OutcomeKind, Position, Technique, TechniqueOutcome, TechniqueType,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawKnowledgeBase {
    #[serde(default)]
    positions: Vec<RawPosition>,
    #[serde(default)]
    techniques: Vec<RawTechnique>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMedia {
    url: String,
    #[serde(rename = "type")]
    kind: String,
    caption: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosition {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    aliases: Vec<String>,
    parent_position_id: Option<String>,
    #[serde(default)]
    variant_ids: Vec<String>,
    #[serde(default)]
    is_variant: bool,
    advantage: Option<String>,
    #[serde(default)]
    media: Vec<RawMedia>,
    #[serde(default)]
    applicable_technique_ids: Vec<String>,
    inverse_position_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutcome {
    #[serde(rename = "type")]
    kind: String,
    end_position_id: Option<String>,
    #[serde(default)]
    description: String,
    likelihood: Option<String>,
    countered_by_technique_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTechnique {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    aliases: Vec<String>,
    applicability: String,
    difficulty: String,
    #[serde(rename = "type")]
    technique_type: String,
    origin_position_id: String,
    #[serde(default)]
    outcomes: Vec<RawOutcome>,
    #[serde(default)]
    countered_by_technique_ids: Vec<String>,
    #[serde(default)]
    follow_up_technique_ids: Vec<String>,
    #[serde(default)]
    setup_technique_ids: Vec<String>,
    #[serde(default)]
    media: Vec<RawMedia>,
    #[serde(default)]
    steps: Vec<String>,
    notes: Option<String>,
}

/// Parse one vocabulary field, naming the owning entity on failure
fn vocab<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
    entity: &str,
    field: &'static str,
) -> Result<T, StoreError> {
    parse(value).ok_or_else(|| StoreError::InvalidData {
        entity: entity.to_string(),
        field,
        value: value.to_string(),
    })
}

fn ids<T: From<String>>(values: Vec<String>) -> Vec<T> {
    values.into_iter().map(T::from).collect()
}

impl RawKnowledgeBase {
    pub(crate) fn into_knowledge_base(self) -> Result<KnowledgeBase, StoreError> {
        let positions = self
            .positions
            .into_iter()
            .map(RawPosition::into_position)
            .collect::<Result<Vec<_>, _>>()?;
        let techniques = self
            .techniques
            .into_iter()
            .map(RawTechnique::into_technique)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KnowledgeBase::new(positions, techniques))
    }
}

impl RawMedia {
    fn into_media(self, entity: &str) -> Result<MediaReference, StoreError> {
        Ok(MediaReference {
            kind: vocab(&self.kind, MediaKind::parse, entity, "media.type")?,
            url: self.url,
            caption: self.caption,
            source: self.source,
        })
    }
}

impl RawPosition {
    fn into_position(self) -> Result<Position, StoreError> {
        let entity = format!("position '{}'", self.id);

        let advantage = self
            .advantage
            .as_deref()
            .map(|value| vocab(value, Advantage::parse, &entity, "advantage"))
            .transpose()?;
        let media = self
            .media
            .into_iter()
            .map(|media| media.into_media(&entity))
            .collect::<Result<_, _>>()?;

        Ok(Position {
            id: self.id.into(),
            name: self.name,
            description: self.description,
            aliases: self.aliases,
            parent_id: self.parent_position_id.map(Into::into),
            variant_ids: ids(self.variant_ids),
            is_variant: self.is_variant,
            advantage,
            media,
            applicable_technique_ids: ids(self.applicable_technique_ids),
            inverse_position_id: self.inverse_position_id.into(),
        })
    }
}

impl RawOutcome {
    fn into_outcome(self, entity: &str) -> Result<TechniqueOutcome, StoreError> {
        let likelihood = self
            .likelihood
            .as_deref()
            .map(|value| vocab(value, Likelihood::parse, entity, "outcomes.likelihood"))
            .transpose()?;

        Ok(TechniqueOutcome {
            kind: vocab(&self.kind, OutcomeKind::parse, entity, "outcomes.type")?,
            end_position_id: self.end_position_id.map(Into::into),
            description: self.description,
            likelihood,
            countered_by_technique_id: self.countered_by_technique_id.map(Into::into),
        })
    }
}

impl RawTechnique {
    fn into_technique(self) -> Result<Technique, StoreError> {
        let entity = format!("technique '{}'", self.id);

        let applicability = vocab(&self.applicability, Applicability::parse, &entity, "applicability")?;
        let difficulty = vocab(&self.difficulty, Difficulty::parse, &entity, "difficulty")?;
        let technique_type = vocab(&self.technique_type, TechniqueType::parse, &entity, "type")?;
        let outcomes = self
            .outcomes
            .into_iter()
            .map(|outcome| outcome.into_outcome(&entity))
            .collect::<Result<_, _>>()?;
        let media = self
            .media
            .into_iter()
            .map(|media| media.into_media(&entity))
            .collect::<Result<_, _>>()?;

        Ok(Technique {
            id: self.id.into(),
            name: self.name,
            description: self.description,
            aliases: self.aliases,
            applicability,
            difficulty,
            technique_type,
            origin_position_id: self.origin_position_id.into(),
            outcomes,
            countered_by_technique_ids: ids(self.countered_by_technique_ids),
            follow_up_technique_ids: ids(self.follow_up_technique_ids),
            setup_technique_ids: ids(self.setup_technique_ids),
            media,
            steps: self.steps,
            notes: self.notes,
        })
    }
}
