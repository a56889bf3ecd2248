//! Skill ratings, grouped the way the match engine groups them.
//!
//! Every rating lives in `1..=100`. Writes go through [`clamp_rating`], and
//! deserialization accepts any number and clamps it, so an out-of-range
//! profile never reaches the derivation stage.

use crate::error::{ActorError, Result};
use serde::{Deserialize, Deserializer, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 100;

/// Rating used for every skill of the fallback profile.
pub const DEFAULT_RATING: u8 = 30;

/// Clamp an arbitrary number into a legal rating. Non-finite input maps to
/// [`DEFAULT_RATING`].
pub fn clamp_rating(value: f32) -> u8 {
    if !value.is_finite() {
        return DEFAULT_RATING;
    }
    value.round().clamp(RATING_MIN as f32, RATING_MAX as f32) as u8
}

/// Rating normalized to `0.01..=1.0`.
#[inline]
pub fn n100(rating: u8) -> f32 {
    rating.clamp(RATING_MIN, RATING_MAX) as f32 / 100.0
}

fn de_rating<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_rating(raw as f32))
}

macro_rules! rating_group {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                #[serde(deserialize_with = "de_rating")]
                pub $field: u8,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::uniform(DEFAULT_RATING)
            }
        }

        impl $name {
            /// Skill names in declaration order.
            pub const NAMES: &'static [&'static str] = &[$(stringify!($field)),+];

            /// Every skill at the same rating.
            pub fn uniform(rating: u8) -> Self {
                let rating = rating.clamp(RATING_MIN, RATING_MAX);
                Self { $($field: rating),+ }
            }

            pub fn get(&self, name: &str) -> Option<u8> {
                match name {
                    $(stringify!($field) => Some(self.$field),)+
                    _ => None,
                }
            }

            /// Returns `false` when `name` is not a skill of this group.
            pub fn set(&mut self, name: &str, value: f32) -> bool {
                match name {
                    $(stringify!($field) => {
                        self.$field = clamp_rating(value);
                        true
                    })+
                    _ => false,
                }
            }

            pub fn average(&self) -> f32 {
                let sum: u32 = 0 $(+ self.$field as u32)+;
                sum as f32 / Self::NAMES.len() as f32
            }

            fn sanitized(self) -> Self {
                Self { $($field: self.$field.clamp(RATING_MIN, RATING_MAX)),+ }
            }
        }
    };
}

rating_group! {
    /// Technical skills (14).
    Technical {
        corners,
        crossing,
        dribbling,
        finishing,
        first_touch,
        free_kicks,
        heading,
        long_shots,
        long_throws,
        marking,
        passing,
        penalty_taking,
        tackling,
        technique,
    }
}

rating_group! {
    /// Mental skills (14).
    Mental {
        aggression,
        anticipation,
        bravery,
        composure,
        concentration,
        decisions,
        determination,
        flair,
        leadership,
        off_the_ball,
        positioning,
        teamwork,
        vision,
        work_rate,
    }
}

rating_group! {
    /// Physical skills (8).
    Physical {
        acceleration,
        agility,
        balance,
        jumping,
        natural_fitness,
        pace,
        stamina,
        strength,
    }
}

/// Skill groups of one actor.
///
/// Missing groups or fields deserialize to [`DEFAULT_RATING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorAttributes {
    pub technical: Technical,
    pub mental: Mental,
    pub physical: Physical,
}

impl ActorAttributes {
    /// Every skill in every group at `rating`.
    pub fn uniform(rating: u8) -> Self {
        Self {
            technical: Technical::uniform(rating),
            mental: Mental::uniform(rating),
            physical: Physical::uniform(rating),
        }
    }

    /// Strict parse: malformed JSON is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let attrs: ActorAttributes = serde_json::from_str(json)?;
        Ok(attrs.sanitized())
    }

    /// Parse, falling back to the complete default profile on any failure.
    pub fn from_json_lossy(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(attrs) => attrs,
            Err(err) => {
                log::warn!("Attribute profile rejected, using defaults: {}", err);
                Self::default()
            }
        }
    }

    /// Re-clamp every rating (struct literals can bypass the setters).
    pub fn sanitized(self) -> Self {
        Self {
            technical: self.technical.sanitized(),
            mental: self.mental.sanitized(),
            physical: self.physical.sanitized(),
        }
    }

    /// Look a skill up by name across all groups.
    pub fn get(&self, name: &str) -> Option<u8> {
        self.technical
            .get(name)
            .or_else(|| self.mental.get(name))
            .or_else(|| self.physical.get(name))
    }

    /// Set a skill by name (clamped). Intended for editing sessions between
    /// matches, followed by `Actor::refresh_from_attributes`.
    pub fn set(&mut self, name: &str, value: f32) -> Result<()> {
        if self.technical.set(name, value)
            || self.mental.set(name, value)
            || self.physical.set(name, value)
        {
            Ok(())
        } else {
            Err(ActorError::UnknownAttribute { name: name.to_string() })
        }
    }

    /// `(technical, mental, physical)` averages.
    pub fn category_averages(&self) -> (f32, f32, f32) {
        (self.technical.average(), self.mental.average(), self.physical.average())
    }
}
