use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of the robot
///
/// Rotations form a cycle of four: turning left goes `Up -> Left -> Down -> Right -> Up`,
/// turning right walks the same cycle backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Rotate 90 degrees counterclockwise
    pub fn turned_left(self) -> Self {
        match self {
            Facing::Up => Facing::Left,
            Facing::Left => Facing::Down,
            Facing::Down => Facing::Right,
            Facing::Right => Facing::Up,
        }
    }

    /// Rotate 90 degrees clockwise
    pub fn turned_right(self) -> Self {
        match self {
            Facing::Up => Facing::Right,
            Facing::Right => Facing::Down,
            Facing::Down => Facing::Left,
            Facing::Left => Facing::Up,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Glyph drawn on the robot's cell in a look view.
    /// Down is `=`, not `v`.
    pub fn glyph(self) -> char {
        match self {
            Facing::Up => '^',
            Facing::Down => '=',
            Facing::Left => '<',
            Facing::Right => '>',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    pub fn all() -> [Facing; 4] {
        [Facing::Up, Facing::Down, Facing::Left, Facing::Right]
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
