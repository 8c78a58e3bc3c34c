// src/tracker.rs
//! Tracker context: framing, routing and snapshot publication
//!
//! [`GpsTracker`] is the single writer. It is owned by the ingestion task and
//! every mutation goes through `&mut self`. [`FixReader`] handles are cheap
//! clones that can be read from any thread; they always see a whole snapshot
//! published after a sentence, never a half-applied one.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::config::TrackerConfig;
use crate::gps::data::LocationFix;
use crate::gps::framer::LineFramer;
use crate::gps::nmea::SentenceKind;
use crate::gps::router::{RoutingRules, SentenceRouter};
use crate::listener::ListenerRegistry;

/// Read-only handle to the latest published fix
#[derive(Debug, Clone, Default)]
pub struct FixReader {
    snapshot: Arc<RwLock<LocationFix>>,
}

impl FixReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the most recently published fix
    pub fn snapshot(&self) -> LocationFix {
        *self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_fix(&self) -> bool {
        self.snapshot().has_fix()
    }

    pub(crate) fn publish(&self, fix: &LocationFix) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = *fix;
    }
}

/// Owns the whole ingestion pipeline for one receiver
#[derive(Debug)]
pub struct GpsTracker {
    framer: LineFramer,
    router: SentenceRouter,
    fix: LocationFix,
    reader: FixReader,
}

impl GpsTracker {
    /// Create a tracker with default configuration
    pub fn new() -> Self {
        Self::with_config(&TrackerConfig::default())
    }

    pub fn with_config(config: &TrackerConfig) -> Self {
        Self {
            framer: LineFramer::with_max_line_len(config.max_line_len),
            router: SentenceRouter::new(
                RoutingRules::from_config(config),
                ListenerRegistry::new(config.listener_mode),
            ),
            fix: LocationFix::new(),
            reader: FixReader::new(),
        }
    }

    /// A handle for reading published fixes from elsewhere
    pub fn reader(&self) -> FixReader {
        self.reader.clone()
    }

    /// The writer's current state
    pub fn fix(&self) -> &LocationFix {
        &self.fix
    }

    pub fn add_update_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&LocationFix) -> anyhow::Result<()> + Send + 'static,
    {
        self.router.listeners_mut().add_update_listener(listener);
    }

    pub fn add_raw_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&str) -> anyhow::Result<()> + Send + 'static,
    {
        self.router.listeners_mut().add_raw_listener(listener);
    }

    /// Feed raw receiver bytes; returns how many sentences were applied
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let lines = self.framer.feed(bytes);
        lines
            .iter()
            .filter(|line| self.route_line(line).is_some())
            .count()
    }

    /// Route a single already-framed line
    pub fn route_line(&mut self, line: &str) -> Option<SentenceKind> {
        let kind = self.router.route(line, &mut self.fix, &self.reader);
        if let Some(kind) = kind {
            debug!(
                sentence = kind.name(),
                valid = self.fix.valid_message_count(),
                "applied sentence"
            );
        }
        kind
    }
}

impl Default for GpsTracker {
    fn default() -> Self {
        Self::new()
    }
}
