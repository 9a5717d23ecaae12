pub mod command;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod movement_log;
pub mod render;
pub mod robot;
pub mod visibility;

pub use direction::Facing;
pub use error::{Result, SimError};
pub use grid::{CellKind, Grid, Position};
pub use movement_log::{MovementLog, StepRecord};
pub use robot::{Command, LookView, Obstacle, Robot, StepOutcome};
pub use visibility::{compute_view, View};
