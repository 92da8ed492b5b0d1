
use std::fmt::Arguments;
use std::sync::Mutex;
use tilesplit::log::{LogLevel, Logger};

/// Logger keeping every message for inspection
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    /// Messages recorded at exactly `level`, in order
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(recorded, _)| *recorded == level)
                    .map(|(_, message)| message.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any message at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.messages_at(level)
            .iter()
            .any(|message| message.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, args.to_string()));
        }
    }
}
