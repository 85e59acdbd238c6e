//! JSONL hand-history logging.

use anyhow::{Context, Result};
use holdem_shared::{ActionEvent, GameSnapshot};
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::table::TableObserver;

/// One line of hand history: the event plus enough context to read the
/// log without replaying it.
#[derive(Debug, Serialize)]
struct HistoryLine<'a> {
    hand_no: u32,
    pot: u32,
    event: &'a ActionEvent,
}

/// Observer that appends every table event as one JSON line. Write
/// failures are logged and swallowed; history must never stall a hand.
pub struct HandHistoryLogger {
    writer: BufWriter<File>,
}

impl HandHistoryLogger {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).with_context(|| {
                    format!("creating history directory '{}'", parent.display())
                })?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("creating history file '{}'", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn append(&mut self, line: &HistoryLine<'_>) -> std::io::Result<()> {
        let json = serde_json::to_string(line).map_err(std::io::Error::other)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl TableObserver for HandHistoryLogger {
    fn on_event(&mut self, event: &ActionEvent, snapshot: &GameSnapshot) {
        let line = HistoryLine {
            hand_no: snapshot.hand_no,
            pot: snapshot.pot,
            event,
        };
        if let Err(err) = self.append(&line) {
            tracing::warn!(%err, "failed to write hand history line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::{ActionKind, GameAction, PlayerId, Stage};

    fn empty_snapshot() -> GameSnapshot {
        GameSnapshot {
            hand_no: 7,
            players: vec![],
            community: vec![],
            pot: 30,
            sb: 5,
            bb: 10,
            button: PlayerId(0),
            to_act: PlayerId(1),
            stage: Stage::Preflop,
            action_log: vec![],
        }
    }

    #[test]
    fn events_are_written_as_parseable_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "holdem-history-test-{}.jsonl",
            std::process::id()
        ));
        let mut logger = HandHistoryLogger::create(&path).unwrap();
        let snapshot = empty_snapshot();

        logger.on_event(
            &ActionEvent::player(PlayerId(1), ActionKind::Call(10)),
            &snapshot,
        );
        logger.on_event(
            &ActionEvent::game(GameAction::StageChanged(Stage::Flop)),
            &snapshot,
        );

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["hand_no"], 7);
            assert_eq!(value["pot"], 30);
            assert!(value.get("event").is_some());
        }
        let _ = std::fs::remove_file(&path);
    }
}
