// The outgoing per-tick movement command.
//
// The client's network layer hands the bot a mutable `UserCmd` once per
// frame and sends whatever the bot leaves in it. The bot fills the time
// delta, the three motion components, the view angles and the button mask.
//
// `msec` is a single byte on the wire, so longer frames saturate at 255.
//
// See also: `bot.rs` for the per-tick reset and `movement.rs` for what
// writes the motion and button fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Button bitmask of a `UserCmd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Buttons(pub u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const ATTACK: Buttons = Buttons(1 << 0);
    pub const JUMP: Buttons = Buttons(1 << 1);
    pub const DUCK: Buttons = Buttons(1 << 2);
    pub const USE: Buttons = Buttons(1 << 5);

    pub const fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

/// One frame of agent input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCmd {
    /// Frame duration in milliseconds.
    pub msec: u8,
    pub forward_move: f32,
    pub side_move: f32,
    pub up_move: f32,
    /// Pitch, yaw, roll in degrees.
    pub view_angles: Vec3,
    pub buttons: Buttons,
}

impl UserCmd {
    /// Zero motion and buttons, keep the view angles.
    pub fn reset_motion(&mut self) {
        self.forward_move = 0.0;
        self.side_move = 0.0;
        self.up_move = 0.0;
        self.buttons = Buttons::NONE;
    }

    /// Store a frame delta, saturating at the wire width.
    pub fn set_msec(&mut self, millis: u128) {
        self.msec = u8::try_from(millis).unwrap_or(u8::MAX);
    }

    pub fn yaw(&self) -> f32 {
        self.view_angles.y
    }

    /// Face `yaw` (degrees) on the horizontal plane.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.view_angles = Vec3::new(0.0, yaw, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_combine() {
        let mut b = Buttons::JUMP | Buttons::DUCK;
        assert!(b.contains(Buttons::JUMP));
        assert!(b.contains(Buttons::DUCK));
        assert!(!b.contains(Buttons::USE));
        b |= Buttons::USE;
        assert!(b.contains(Buttons::USE));
    }

    #[test]
    fn msec_saturates() {
        let mut cmd = UserCmd::default();
        cmd.set_msec(16);
        assert_eq!(cmd.msec, 16);
        cmd.set_msec(10_000);
        assert_eq!(cmd.msec, 255);
    }

    #[test]
    fn reset_keeps_view() {
        let mut cmd = UserCmd {
            forward_move: 250.0,
            buttons: Buttons::JUMP,
            ..UserCmd::default()
        };
        cmd.set_yaw(45.0);
        cmd.reset_motion();
        assert_eq!(cmd.forward_move, 0.0);
        assert_eq!(cmd.buttons, Buttons::NONE);
        assert_eq!(cmd.yaw(), 45.0);
    }
}
