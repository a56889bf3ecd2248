//! Role archetypes for positional ratings.

use super::attributes::ActorAttributes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl RoleTag {
    pub fn all() -> &'static [RoleTag] {
        &[RoleTag::Goalkeeper, RoleTag::Defender, RoleTag::Midfielder, RoleTag::Attacker]
    }

    /// Curated `(skill, weight)` subset that defines the role.
    pub fn weights(&self) -> &'static [(&'static str, f32)] {
        match self {
            RoleTag::Goalkeeper => &[
                ("agility", 3.0),
                ("jumping", 2.5),
                ("positioning", 2.5),
                ("concentration", 2.0),
                ("anticipation", 2.0),
                ("decisions", 1.5),
                ("first_touch", 1.0),
                ("passing", 1.0),
            ],
            RoleTag::Defender => &[
                ("tackling", 3.0),
                ("marking", 3.0),
                ("positioning", 2.5),
                ("heading", 2.0),
                ("strength", 2.0),
                ("anticipation", 1.5),
                ("concentration", 1.5),
                ("pace", 1.0),
            ],
            RoleTag::Midfielder => &[
                ("passing", 3.0),
                ("vision", 3.0),
                ("technique", 2.0),
                ("first_touch", 2.0),
                ("decisions", 2.0),
                ("teamwork", 1.5),
                ("work_rate", 1.5),
                ("stamina", 1.0),
            ],
            RoleTag::Attacker => &[
                ("finishing", 3.0),
                ("off_the_ball", 2.5),
                ("composure", 2.0),
                ("dribbling", 2.0),
                ("pace", 2.0),
                ("acceleration", 1.5),
                ("first_touch", 1.5),
                ("long_shots", 1.0),
            ],
        }
    }

    /// Weighted average of the role's skills, unrounded.
    pub fn weighted_average(&self, attrs: &ActorAttributes) -> f32 {
        let (sum, total) = self
            .weights()
            .iter()
            .filter_map(|(name, w)| attrs.get(name).map(|r| (r as f32 * w, *w)))
            .fold((0.0, 0.0), |(s, t), (v, w)| (s + v, t + w));
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleTag::Goalkeeper => "goalkeeper",
            RoleTag::Defender => "defender",
            RoleTag::Midfielder => "midfielder",
            RoleTag::Attacker => "attacker",
        };
        f.write_str(name)
    }
}

impl FromStr for RoleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "gk" => Ok(RoleTag::Goalkeeper),
            "defender" | "df" | "def" => Ok(RoleTag::Defender),
            "midfielder" | "mf" | "mid" => Ok(RoleTag::Midfielder),
            "attacker" | "fw" | "forward" | "striker" => Ok(RoleTag::Attacker),
            other => Err(format!("unknown role tag: {}", other)),
        }
    }
}
