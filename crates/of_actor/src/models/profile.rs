//! Snapshot of everything an actor is built from.

use super::attributes::ActorAttributes;
use super::traits::TraitSet;
use crate::error::{ActorError, Result};
use serde::{Deserialize, Serialize};

/// Attribute + trait snapshot, as authored by editing tools or a save file.
///
/// Actors copy this at construction; later edits to the source profile do
/// not reach a live actor until it is explicitly refreshed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillProfile {
    pub attributes: ActorAttributes,
    pub traits: TraitSet,
}

impl SkillProfile {
    pub fn new(attributes: ActorAttributes, traits: TraitSet) -> Self {
        Self { attributes: attributes.sanitized(), traits: traits.reconciled() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ActorError::InvalidProfile(format!(
                "expected an object, found {}",
                json_kind(&value)
            )));
        }
        let profile: SkillProfile = serde_json::from_value(value)?;
        Ok(Self::new(profile.attributes, profile.traits))
    }

    /// Parse, falling back to the default profile (no traits) on failure.
    pub fn from_json_lossy(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            log::warn!("Skill profile rejected, using defaults: {}", err);
            Self::default()
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
