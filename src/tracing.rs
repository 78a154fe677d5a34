//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! buffer mutations, caret resolution and codec decisions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=buffer=debug,cursor=trace` - scoped filtering
//! - `RUST_LOG=codec=trace` - unknown identifiers kept as text
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tagbuf/logs/tagbuf.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{Position, TagEditorState};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr so
/// it never mixes with converter output. File logging writes debug level to
/// `~/.config/tagbuf/logs/tagbuf.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tagbuf.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub segment_count: usize,
    pub token_count: usize,
    pub units: usize,
    pub last_known: Option<Position>,
}

impl BufferSnapshot {
    pub fn from_state(state: &TagEditorState) -> Self {
        let buffer = state.buffer();
        Self {
            segment_count: buffer.len(),
            token_count: buffer.token_count(),
            units: buffer.len_units(),
            last_known: state.tracker().last_known(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &BufferSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.segment_count != other.segment_count {
            changes.push(format!(
                "segments: {} → {}",
                self.segment_count, other.segment_count
            ));
        }
        if self.token_count != other.token_count {
            changes.push(format!(
                "tokens: {} → {}",
                self.token_count, other.token_count
            ));
        }
        if self.units != other.units {
            changes.push(format!("units: {} → {}", self.units, other.units));
        }
        if self.last_known != other.last_known {
            let show = |p: Option<Position>| p.map_or("none".to_string(), |p| p.to_string());
            changes.push(format!(
                "caret: {} → {}",
                show(self.last_known),
                show(other.last_known)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
