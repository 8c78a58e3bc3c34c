// src/listener.rs
//! Update and raw-sentence listener registry
//!
//! Listeners run synchronously on the ingestion path. A listener that returns
//! an error or panics is logged and skipped; the remaining listeners still run
//! and the tracker state is unaffected.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gps::data::LocationFix;

/// Called after a sentence that notifies (GGA and RMC by default)
pub type UpdateListener = Box<dyn FnMut(&LocationFix) -> anyhow::Result<()> + Send>;

/// Called with every framed line, recognized or not
pub type RawListener = Box<dyn FnMut(&str) -> anyhow::Result<()> + Send>;

/// How many listeners of each kind may be registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerMode {
    /// Any number, invoked in registration order
    #[default]
    Multi,
    /// At most one; registering replaces the previous listener
    Single,
}

pub struct ListenerRegistry {
    mode: ListenerMode,
    update_listeners: Vec<UpdateListener>,
    raw_listeners: Vec<RawListener>,
}

impl ListenerRegistry {
    pub fn new(mode: ListenerMode) -> Self {
        Self {
            mode,
            update_listeners: Vec::new(),
            raw_listeners: Vec::new(),
        }
    }

    pub fn add_update_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&LocationFix) -> anyhow::Result<()> + Send + 'static,
    {
        if self.mode == ListenerMode::Single {
            self.update_listeners.clear();
        }
        self.update_listeners.push(Box::new(listener));
    }

    pub fn add_raw_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&str) -> anyhow::Result<()> + Send + 'static,
    {
        if self.mode == ListenerMode::Single {
            self.raw_listeners.clear();
        }
        self.raw_listeners.push(Box::new(listener));
    }

    /// Invoke every update listener once with the current fix
    pub fn dispatch_update(&mut self, fix: &LocationFix) {
        for (index, listener) in self.update_listeners.iter_mut().enumerate() {
            isolate("update", index, || listener(fix));
        }
    }

    /// Invoke every raw listener once with the framed line
    pub fn dispatch_raw(&mut self, line: &str) {
        for (index, listener) in self.raw_listeners.iter_mut().enumerate() {
            isolate("raw", index, || listener(line));
        }
    }

    pub fn update_listener_count(&self) -> usize {
        self.update_listeners.len()
    }

    pub fn raw_listener_count(&self) -> usize {
        self.raw_listeners.len()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new(ListenerMode::default())
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("mode", &self.mode)
            .field("update_listeners", &self.update_listeners.len())
            .field("raw_listeners", &self.raw_listeners.len())
            .finish()
    }
}

/// Run one listener, swallowing its error or panic
fn isolate<F>(kind: &str, index: usize, call: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(kind, index, error = %e, "listener failed"),
        Err(_) => warn!(kind, index, "listener panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[test]
    fn test_failing_listener_does_not_stop_dispatch() {
        let mut registry = ListenerRegistry::default();
        let first = counter();
        let second = counter();
        let third = counter();

        let c = Arc::clone(&first);
        registry.add_update_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let c = Arc::clone(&second);
        registry.add_update_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("listener two is broken")
        });
        let c = Arc::clone(&third);
        registry.add_update_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        registry.dispatch_update(&LocationFix::new());

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let mut registry = ListenerRegistry::default();
        let first = counter();
        let third = counter();

        let c = Arc::clone(&first);
        registry.add_raw_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        registry.add_raw_listener(|_| panic!("boom"));
        let c = Arc::clone(&third);
        registry.add_raw_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        registry.dispatch_raw("$GPGGA");

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = ListenerRegistry::default();
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let order = Arc::clone(&order);
            registry.add_raw_listener(move |line| {
                order.lock().unwrap().push(format!("{}:{}", id, line));
                Ok(())
            });
        }

        registry.dispatch_raw("x");
        assert_eq!(*order.lock().unwrap(), vec!["0:x", "1:x", "2:x"]);
    }

    #[test]
    fn test_single_mode_replaces_listener() {
        let mut registry = ListenerRegistry::new(ListenerMode::Single);
        let old = counter();
        let new = counter();

        let c = Arc::clone(&old);
        registry.add_update_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let c = Arc::clone(&new);
        registry.add_update_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(registry.update_listener_count(), 1);
        registry.dispatch_update(&LocationFix::new());
        assert_eq!(old.load(Ordering::SeqCst), 0);
        assert_eq!(new.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_with_no_listeners() {
        let mut registry = ListenerRegistry::default();
        registry.dispatch_update(&LocationFix::new());
        registry.dispatch_raw("$GPGSA,A,3");
        assert_eq!(registry.raw_listener_count(), 0);
    }
}
