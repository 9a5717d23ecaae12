use crate::direction::Facing;
use crate::error::{Result, SimError};
use crate::grid::{CellKind, Grid, Position};
use crate::movement_log::{MovementLog, StepRecord};
use crate::visibility::compute_view;
use log::{debug, info};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Movement and rotation commands; each one consumes a step and is logged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    TurnLeft,
    TurnRight,
    TurnBack,
}

impl Command {
    pub fn all() -> [Command; 7] {
        [
            Command::MoveLeft,
            Command::MoveRight,
            Command::MoveUp,
            Command::MoveDown,
            Command::TurnLeft,
            Command::TurnRight,
            Command::TurnBack,
        ]
    }

    /// Token accepted on the command line
    pub fn token(self) -> &'static str {
        match self {
            Command::MoveLeft => "left",
            Command::MoveRight => "right",
            Command::MoveUp => "up",
            Command::MoveDown => "down",
            Command::TurnLeft => "turn_left",
            Command::TurnRight => "turn_right",
            Command::TurnBack => "turn_back",
        }
    }

    /// Grid (row, col) delta for moves; `None` for rotations
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Command::MoveLeft => Some((0, -1)),
            Command::MoveRight => Some((0, 1)),
            Command::MoveUp => Some((-1, 0)),
            Command::MoveDown => Some((1, 0)),
            Command::TurnLeft | Command::TurnRight | Command::TurnBack => None,
        }
    }

    /// Pure state transform: where the robot ends up and which way it faces.
    /// Movement direction does not depend on the current facing.
    fn apply(self, grid: &Grid, position: Position, facing: Facing) -> Result<Transition> {
        let transition = match self.delta() {
            Some((d_row, d_col)) => {
                let target = position.offset(d_row, d_col);
                match grid.cell_kind(target)? {
                    CellKind::Open => Transition::to(target, facing),
                    CellKind::Barrier => Transition::blocked(position, facing, Obstacle::Barrier),
                    CellKind::Wall => Transition::blocked(position, facing, Obstacle::Wall),
                }
            }
            None => {
                let facing = match self {
                    Command::TurnLeft => facing.turned_left(),
                    Command::TurnRight => facing.turned_right(),
                    _ => facing.opposite(),
                };
                Transition::to(position, facing)
            }
        };
        Ok(transition)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// What stopped a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Barrier,
    Wall,
}

impl Obstacle {
    pub fn name(self) -> &'static str {
        match self {
            Obstacle::Barrier => "barrier",
            Obstacle::Wall => "wall",
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    position: Position,
    facing: Facing,
    blocked: Option<Obstacle>,
}

impl Transition {
    fn to(position: Position, facing: Facing) -> Self {
        Transition {
            position,
            facing,
            blocked: None,
        }
    }

    fn blocked(position: Position, facing: Facing, obstacle: Obstacle) -> Self {
        Transition {
            position,
            facing,
            blocked: Some(obstacle),
        }
    }
}

/// Result of one logged command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step number the record was stored under
    pub step: u64,
    pub record: StepRecord,
    /// Set when a move hit a barrier or wall; position is unchanged then
    pub blocked: Option<Obstacle>,
}

/// Symbols around the robot as seen by a look command
#[derive(Clone, Debug, PartialEq)]
pub struct LookView {
    /// Terrain symbols of the window, with the robot's cell replaced by its facing glyph
    pub symbols: Vec<Vec<char>>,
    pub mask: Vec<Vec<bool>>,
    /// Robot cell in window-local coordinates
    pub robot: Position,
    /// Grid position of the window's top-left cell
    pub offset: Position,
    pub facing: Facing,
}

impl LookView {
    /// Symbol at a window-local cell if it is visible
    pub fn visible_symbol(&self, local: Position) -> Option<char> {
        if local.row < 0 || local.col < 0 {
            return None;
        }
        let (r, c) = (local.row as usize, local.col as usize);
        match self.mask.get(r).and_then(|row| row.get(c)) {
            Some(true) => self.symbols.get(r).and_then(|row| row.get(c)).copied(),
            _ => None,
        }
    }
}

/// State that only exists once the robot has been placed in a grid
#[derive(Clone, Debug)]
struct Placement {
    grid: Grid,
    position: Position,
    facing: Facing,
    step: u64,
    log: MovementLog,
}

/// Robot moving through a grid and keeping a history of its commands
#[derive(Clone, Debug)]
pub struct Robot {
    /// Euclidean radius the robot can see
    radius: i32,
    placement: Option<Placement>,
}

impl Robot {
    /// Create an unplaced robot
    pub fn new(radius: i32) -> Self {
        Robot {
            radius,
            placement: None,
        }
    }

    /// Put the robot on the open cell nearest the grid center, facing up,
    /// with a fresh step counter and log
    pub fn place_in_grid(&mut self, grid: Grid) -> Result<()> {
        let position = grid.nearest_open_cell_to_center()?;
        info!("Placed robot at {} in {}x{} grid", position, grid.rows, grid.cols);

        self.placement = Some(Placement {
            grid,
            position,
            facing: Facing::Up,
            step: 0,
            log: MovementLog::new(),
        });
        Ok(())
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    fn placed(&self) -> Result<&Placement> {
        self.placement.as_ref().ok_or(SimError::NotPlaced)
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn grid(&self) -> Result<&Grid> {
        Ok(&self.placed()?.grid)
    }

    pub fn position(&self) -> Result<Position> {
        Ok(self.placed()?.position)
    }

    pub fn facing(&self) -> Result<Facing> {
        Ok(self.placed()?.facing)
    }

    /// Number of commands executed since placement
    pub fn step(&self) -> Result<u64> {
        Ok(self.placed()?.step)
    }

    pub fn log(&self) -> Result<&MovementLog> {
        Ok(&self.placed()?.log)
    }

    /// Run a command: check placement, snapshot before and after, log it
    /// under the current step and advance the step, blocked or not.
    pub fn execute(&mut self, command: Command) -> Result<StepOutcome> {
        let placement = self.placement.as_mut().ok_or(SimError::NotPlaced)?;
        let transition = command.apply(&placement.grid, placement.position, placement.facing)?;

        let step = placement.step;
        let record = StepRecord {
            previous_position: placement.position,
            previous_direction: placement.facing,
            current_position: transition.position,
            current_direction: transition.facing,
        };

        placement.position = transition.position;
        placement.facing = transition.facing;
        placement.log.record(step, record);
        placement.step += 1;

        match transition.blocked {
            Some(obstacle) => debug!(
                "Step {}: {} blocked by {} at {}",
                step, command, obstacle, transition.position
            ),
            None => debug!(
                "Step {}: {} -> {} facing {}",
                step, command, transition.position, transition.facing
            ),
        }

        Ok(StepOutcome {
            step,
            record,
            blocked: transition.blocked,
        })
    }

    pub fn left(&mut self) -> Result<StepOutcome> {
        self.execute(Command::MoveLeft)
    }

    pub fn right(&mut self) -> Result<StepOutcome> {
        self.execute(Command::MoveRight)
    }

    pub fn up(&mut self) -> Result<StepOutcome> {
        self.execute(Command::MoveUp)
    }

    pub fn down(&mut self) -> Result<StepOutcome> {
        self.execute(Command::MoveDown)
    }

    pub fn turn_left(&mut self) -> Result<StepOutcome> {
        self.execute(Command::TurnLeft)
    }

    pub fn turn_right(&mut self) -> Result<StepOutcome> {
        self.execute(Command::TurnRight)
    }

    pub fn turn_back(&mut self) -> Result<StepOutcome> {
        self.execute(Command::TurnBack)
    }

    /// Visible surroundings; does not consume a step and is not logged
    pub fn look_around(&self) -> Result<LookView> {
        let placement = self.placed()?;
        let view = compute_view(&placement.grid, placement.position, self.radius);

        let mut symbols = Grid::render_symbols(&view.window);
        symbols[view.origin.row as usize][view.origin.col as usize] = placement.facing.glyph();

        Ok(LookView {
            symbols,
            mask: view.mask,
            robot: view.origin,
            offset: view.offset,
            facing: placement.facing,
        })
    }

    /// Write the movement log as JSON into `sink`
    pub fn persist_log<W: Write>(&self, sink: W) -> Result<()> {
        self.placed()?.log.write_to(sink)
    }

    pub fn save_log<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.placed()?.log.save_to_file(path)
    }
}
