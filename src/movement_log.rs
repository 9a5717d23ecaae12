use crate::direction::Facing;
use crate::error::Result;
use crate::grid::Position;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Before/after snapshot of a single movement or rotation command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub previous_position: Position,
    pub previous_direction: Facing,
    pub current_position: Position,
    pub current_direction: Facing,
}

impl StepRecord {
    /// True when the command changed the robot's cell
    pub fn moved(&self) -> bool {
        self.previous_position != self.current_position
    }

    /// True when the command changed the robot's facing
    pub fn turned(&self) -> bool {
        self.previous_direction != self.current_direction
    }
}

/// Movement history keyed by step number
///
/// Persisted as a JSON object whose keys are the step numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementLog {
    steps: BTreeMap<u64, StepRecord>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the snapshot for `step`
    pub fn record(&mut self, step: u64, record: StepRecord) {
        self.steps.insert(step, record);
    }

    pub fn get(&self, step: u64) -> Option<&StepRecord> {
        self.steps.get(&step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Entries in ascending step order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &StepRecord)> {
        self.steps.iter().map(|(&step, record)| (step, record))
    }

    /// Serialize the whole log as pretty JSON into `sink`
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        serde_json::to_writer_pretty(sink, self)?;
        Ok(())
    }

    /// Save log to a JSON file, replacing any previous content
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("Saved {} movement log entries to {}", self.len(), path.display());
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Counts of (position changes, pure turns, blocked moves)
    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for record in self.steps.values() {
            if record.moved() {
                summary.moves += 1;
            } else if record.turned() {
                summary.turns += 1;
            } else {
                summary.blocked += 1;
            }
        }
        summary.total = self.len();
        summary
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub total: usize,
    pub moves: usize,
    pub turns: usize,
    /// Commands that left both position and facing unchanged
    pub blocked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> MovementLog {
        let mut log = MovementLog::new();
        log.record(
            0,
            StepRecord {
                previous_position: Position::new(2, 2),
                previous_direction: Facing::Up,
                current_position: Position::new(2, 1),
                current_direction: Facing::Up,
            },
        );
        log.record(
            1,
            StepRecord {
                previous_position: Position::new(2, 1),
                previous_direction: Facing::Up,
                current_position: Position::new(2, 1),
                current_direction: Facing::Left,
            },
        );
        log
    }

    #[test]
    fn test_json_shape() {
        let mut buffer = Vec::new();
        sample_log().write_to(&mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let first = &value["0"];
        assert_eq!(first["previous_position"], serde_json::json!([2, 2]));
        assert_eq!(first["previous_direction"], "up");
        assert_eq!(first["current_position"], serde_json::json!([2, 1]));
        assert_eq!(first["current_direction"], "up");
        assert_eq!(value["1"]["current_direction"], "left");
    }

    #[test]
    fn test_reload_from_reader() {
        let log = sample_log();
        let mut buffer = Vec::new();
        log.write_to(&mut buffer).unwrap();

        let loaded = MovementLog::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(loaded, log);
        assert_eq!(loaded.iter().map(|(step, _)| step).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_summary() {
        let mut log = sample_log();
        let stay = StepRecord {
            previous_position: Position::new(2, 1),
            previous_direction: Facing::Left,
            current_position: Position::new(2, 1),
            current_direction: Facing::Left,
        };
        log.record(2, stay);

        assert_eq!(
            log.summary(),
            LogSummary {
                total: 3,
                moves: 1,
                turns: 1,
                blocked: 1,
            }
        );
    }
}
