pub mod attributes;
pub mod profile;
pub mod role;
pub mod traits;

pub use attributes::{ActorAttributes, Mental, Physical, Technical, DEFAULT_RATING};
pub use profile::SkillProfile;
pub use role::RoleTag;
pub use traits::{TraitSet, TraitTarget};
