//! Interval-driven table refresh.
//!
//! Fires the refresh callback on every tick while the console is both
//! authenticated and has auto-refresh switched on. Gate changes apply from
//! the next tick. Dropping the handle stops the task.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshGate {
    pub authenticated: bool,
    pub enabled: bool,
}

impl RefreshGate {
    pub fn is_open(&self) -> bool {
        self.authenticated && self.enabled
    }
}

pub struct AutoRefresh {
    gate: watch::Sender<RefreshGate>,
    task: JoinHandle<()>,
}

impl AutoRefresh {
    /// Spawn the timer. Starts closed; open it with [`set_authenticated`]
    /// and [`set_enabled`].
    ///
    /// [`set_authenticated`]: AutoRefresh::set_authenticated
    /// [`set_enabled`]: AutoRefresh::set_enabled
    pub fn spawn<F, Fut>(interval: Duration, refresh: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (gate, rx) = watch::channel(RefreshGate::default());

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the table has just loaded.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let open = rx.borrow().is_open();
                if open {
                    tracing::trace!("Auto-refresh tick");
                    refresh().await;
                }
            }
        });

        Self { gate, task }
    }

    /// Timer using the configured console refresh period.
    pub fn for_console<F, Fut>(settings: &crate::config::ConsoleSettings, refresh: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(settings.refresh_interval(), refresh)
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.gate.send_modify(|gate| gate.authenticated = authenticated);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.gate.send_modify(|gate| gate.enabled = enabled);
    }

    pub fn gate(&self) -> RefreshGate {
        *self.gate.borrow()
    }

    pub fn stop(self) {
        // Drop aborts the task.
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.task.abort();
    }
}
