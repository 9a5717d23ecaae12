//! Text presentation of look views and step reports
//!
//! The simulation core only hands out symbols and masks; everything that
//! decides how they end up on a terminal lives here.

use crate::grid::Position;
use crate::movement_log::StepRecord;
use crate::robot::{LookView, Obstacle, StepOutcome};

const VISIBLE_BG: &str = "\x1b[43m";
const ROBOT_BG: &str = "\x1b[42m";
const RESET: &str = "\x1b[0m";

/// Turns a look view into printable text
pub trait ViewRenderer {
    fn render(&self, view: &LookView) -> String;
}

/// Highlights visible cells with ANSI background colors
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiRenderer;

/// Visible symbols only, for terminals without color
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

impl ViewRenderer for AnsiRenderer {
    fn render(&self, view: &LookView) -> String {
        render_rows(view, |local, symbol| {
            let color = if local == view.robot { ROBOT_BG } else { VISIBLE_BG };
            format!("{}{}{}", color, symbol, RESET)
        })
    }
}

impl ViewRenderer for PlainRenderer {
    fn render(&self, view: &LookView) -> String {
        render_rows(view, |_, symbol| symbol.to_string())
    }
}

/// Lay out the view row by row; hidden cells become a space
fn render_rows<F>(view: &LookView, mut visible_cell: F) -> String
where
    F: FnMut(Position, char) -> String,
{
    let mut lines = Vec::with_capacity(view.symbols.len());
    for (r, row) in view.symbols.iter().enumerate() {
        let mut line = String::new();
        for c in 0..row.len() {
            let local = Position::new(r as i32, c as i32);
            match view.visible_symbol(local) {
                Some(symbol) => line.push_str(&visible_cell(local, symbol)),
                None => line.push(' '),
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Four-line before/after report printed after every command
pub fn step_report(record: &StepRecord) -> String {
    format!(
        "Previous position: {}\nPrevious direction: {}\n\
         Current position: {}\nCurrent direction: {}",
        record.previous_position,
        record.previous_direction,
        record.current_position,
        record.current_direction
    )
}

/// Informational text for a move that hit an obstacle
pub fn blocked_message(obstacle: Obstacle, position: Position) -> String {
    format!(
        "There is a {} where you want to go.\nStay on {} position.",
        obstacle, position
    )
}

/// Full text for a command outcome: blocked notice (if any) followed by the report
pub fn outcome_report(outcome: &StepOutcome) -> String {
    match outcome.blocked {
        Some(obstacle) => format!(
            "{}\n{}",
            blocked_message(obstacle, outcome.record.current_position),
            step_report(&outcome.record)
        ),
        None => step_report(&outcome.record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Facing;

    fn small_view() -> LookView {
        LookView {
            symbols: vec![
                vec!['+', '.', '+'],
                vec!['.', '^', '.'],
                vec!['+', '.', '+'],
            ],
            mask: vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, true, false],
            ],
            robot: Position::new(1, 1),
            offset: Position::new(1, 1),
            facing: Facing::Up,
        }
    }

    #[test]
    fn test_plain_render() {
        assert_eq!(PlainRenderer.render(&small_view()), " . \n.^.\n . ");
    }

    #[test]
    fn test_ansi_render_colors_robot_cell() {
        let text = AnsiRenderer.render(&small_view());
        let middle = text.lines().nth(1).unwrap();

        assert!(middle.contains("\x1b[42m^\x1b[0m"));
        assert!(middle.starts_with("\x1b[43m.\x1b[0m"));
        assert!(text.starts_with(' '));
    }

    #[test]
    fn test_step_report() {
        let record = StepRecord {
            previous_position: Position::new(2, 2),
            previous_direction: Facing::Up,
            current_position: Position::new(2, 1),
            current_direction: Facing::Up,
        };
        let lines: Vec<_> = step_report(&record).lines().map(str::to_string).collect();

        assert_eq!(
            lines,
            vec![
                "Previous position: (2, 2)",
                "Previous direction: up",
                "Current position: (2, 1)",
                "Current direction: up",
            ]
        );
    }

    #[test]
    fn test_blocked_outcome_report() {
        let record = StepRecord {
            previous_position: Position::new(1, 2),
            previous_direction: Facing::Up,
            current_position: Position::new(1, 2),
            current_direction: Facing::Up,
        };
        let outcome = StepOutcome {
            step: 4,
            record,
            blocked: Some(Obstacle::Wall),
        };
        let text = outcome_report(&outcome);

        assert!(text.starts_with(
            "There is a wall where you want to go.\nStay on (1, 2) position.\n"
        ));
        assert!(text.ends_with("Current direction: up"));
    }
}
