//! JSON-lines event logger
//!
//! Writes every bus event of a session to `logs/<timestamp>_<id>.jsonl`.
//! Logging is best-effort: any IO failure disables the logger with a
//! warning and gameplay continues.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::{BusEvent, EventBus};
use super::types::GameEvent;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open a file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Open the session log file and write the SessionStart line
    pub fn start_session(&mut self) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            self.config.enabled = false;
            return;
        }

        let filename = format!("{}_{}.jsonl", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!("Logging session {} to {}", self.session_id, path.display());
                let start = BusEvent {
                    time_ms: 0,
                    event: GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp: chrono::Local::now().to_rfc3339(),
                    },
                };
                self.log(&start);
            }
            Err(e) => {
                warn!("Failed to open event log {}: {}", path.display(), e);
                self.config.enabled = false;
            }
        }
    }

    /// Write one event as a JSON line
    pub fn log(&mut self, event: &BusEvent) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let line = serde_json::json!({
            "t_ms": event.time_ms,
            "type": event.event.type_code(),
            "event": event.event,
        });
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Event log write failed: {}, disabling logger", e);
            self.writer = None;
        }
    }

    /// Flush buffered lines to disk
    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// System: drain the bus into the session log each frame
pub fn log_events(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    if !bus.has_pending() {
        return;
    }
    for event in bus.drain() {
        logger.log(&event);
    }
    logger.flush();
    bus.clear_processed();
}
