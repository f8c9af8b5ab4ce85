//! Trailing-edge debounce for text inputs.
//!
//! Each call arms a new generation; only the callback whose generation is
//! still current when its timer fires runs. Outside the browser the timer
//! never fires.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Quiet period before a search box commits its text.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any pending callback and return the new generation.
    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Drop any pending callback without arming a new one.
    pub fn cancel(&self) {
        self.arm();
    }

    /// Run `f` once `delay_ms` pass without another call.
    pub fn call<F>(&self, delay_ms: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        let generation = self.arm();
        #[cfg(feature = "hydrate")]
        {
            let this = self.clone();
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(delay_ms).await;
                if this.is_current(generation) {
                    f();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (generation, delay_ms, f);
        }
    }
}
