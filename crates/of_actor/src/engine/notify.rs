//! User-facing notices for rejected actions.
//!
//! Only intent-driven actors emit notices; an externally driven actor has
//! nobody at the controls to read them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Shot released with the ball outside the control radius.
    ShotOutOfRange { distance: f32, control_radius: f32 },
    /// Jump requested while the cooldown is still running.
    JumpOnCooldown { remaining: f32 },
    /// Jump requested without enough stamina to pay for it.
    JumpNoStamina { stamina: f32, cost: f32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ShotOutOfRange { distance, control_radius } => {
                write!(f, "Too far from the ball to shoot ({:.1} m > {:.1} m)", distance, control_radius)
            }
            Notice::JumpOnCooldown { remaining } => {
                write!(f, "Can't jump yet ({:.1} s)", remaining)
            }
            Notice::JumpNoStamina { stamina, cost } => {
                write!(f, "Too tired to jump ({:.0}/{:.0})", stamina, cost)
            }
        }
    }
}

/// Notification collaborator (toast, HUD line, log sink...).
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Keeps every notice, newest last.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
