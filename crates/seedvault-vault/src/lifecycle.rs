// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host lifecycle signals wired to `lock()` and `destroy()`.
//!
//! The idle lock is an externally owned timer: [`LifecycleHooks::on_hidden`]
//! arms it, [`LifecycleHooks::on_visible`] disarms it, and when it fires the
//! manager is locked. The manager itself never polls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use seedvault_config::model::SessionConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::manager::KeyManager;

/// Forwards page lifecycle events to a [`KeyManager`].
pub struct LifecycleHooks {
    manager: Arc<KeyManager>,
    idle_timeout: Duration,
    idle_timer: Mutex<Option<CancellationToken>>,
}

impl LifecycleHooks {
    pub fn new(manager: Arc<KeyManager>, config: &SessionConfig) -> Self {
        Self::with_idle_timeout(manager, Duration::from_secs(config.idle_lock_secs))
    }

    pub fn with_idle_timeout(manager: Arc<KeyManager>, idle_timeout: Duration) -> Self {
        Self {
            manager,
            idle_timeout,
            idle_timer: Mutex::new(None),
        }
    }

    /// The host went to the background. Arms the idle timer unless it is
    /// already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_hidden(&self) {
        let mut timer = self.idle_timer.lock().unwrap_or_else(|e| e.into_inner());
        if timer.as_ref().is_some_and(|t| !t.is_cancelled()) {
            return;
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let manager = Arc::clone(&self.manager);
        let idle_timeout = self.idle_timeout;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!("idle lock timer disarmed");
                }
                _ = tokio::time::sleep(idle_timeout) => {
                    info!(idle_secs = idle_timeout.as_secs(), "idle timeout reached, locking wallet");
                    manager.lock();
                }
            }
        });

        *timer = Some(token);
        debug!(idle_secs = idle_timeout.as_secs(), "idle lock timer armed");
    }

    /// The host is visible again. Disarms a pending idle lock.
    pub fn on_visible(&self) {
        self.disarm();
    }

    /// The page is being hidden for navigation or bfcache. Locks immediately.
    pub fn on_page_hide(&self) {
        self.disarm();
        self.manager.lock();
    }

    /// The page is unloading. Destroys all key material.
    pub fn on_unload(&self) {
        self.disarm();
        self.manager.destroy();
    }

    pub fn idle_timer_armed(&self) -> bool {
        self.idle_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    fn disarm(&self) {
        if let Some(token) = self
            .idle_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            token.cancel();
        }
    }
}

impl Drop for LifecycleHooks {
    fn drop(&mut self) {
        self.disarm();
    }
}
