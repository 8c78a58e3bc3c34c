// src/gps/router.rs
//! Routes framed lines to raw listeners and sentence decoders

use tracing::{debug, trace};

use super::data::LocationFix;
use super::nmea::{self, SentenceKind};
use crate::config::TrackerConfig;
use crate::listener::ListenerRegistry;
use crate::tracker::FixReader;

/// Which sentence kinds count as valid messages and which notify listeners
#[derive(Debug, Clone)]
pub struct RoutingRules {
    pub counted: Vec<SentenceKind>,
    pub notify: Vec<SentenceKind>,
}

impl RoutingRules {
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            counted: config.counted_sentences.clone(),
            notify: config.notify_sentences.clone(),
        }
    }
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self::from_config(&TrackerConfig::default())
    }
}

#[derive(Debug)]
pub struct SentenceRouter {
    rules: RoutingRules,
    listeners: ListenerRegistry,
}

impl SentenceRouter {
    pub fn new(rules: RoutingRules, listeners: ListenerRegistry) -> Self {
        Self { rules, listeners }
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Route one framed line.
    ///
    /// Raw listeners always see the line. A recognized, decodable sentence is
    /// applied to `fix`, published through `reader`, and then announced to
    /// update listeners if its kind notifies. Returns the kind that was
    /// applied, if any.
    pub fn route(
        &mut self,
        line: &str,
        fix: &mut LocationFix,
        reader: &FixReader,
    ) -> Option<SentenceKind> {
        self.listeners.dispatch_raw(line);

        let fields: Vec<&str> = line.split(',').collect();
        let Some(kind) = fields.first().and_then(|id| SentenceKind::identify(id)) else {
            trace!(line, "ignoring unrecognized sentence");
            return None;
        };

        let Some(update) = nmea::decode(kind, &fields) else {
            debug!(sentence = kind.name(), fields = fields.len(), "discarding malformed sentence");
            return None;
        };

        update.apply(fix);
        if update.counts_as_valid() && self.rules.counted.contains(&kind) {
            fix.valid_message_count += 1;
        }
        reader.publish(fix);

        if self.rules.notify.contains(&kind) {
            self.listeners.dispatch_update(fix);
        }

        Some(kind)
    }
}
