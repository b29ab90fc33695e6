// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokio bridge for the core scheduler
//!
//! The core crate never blocks or spawns; it only queues timers. A
//! [`Driver`] wires that timer queue to real time: it drains due callbacks,
//! then sleeps until the next deadline, until no live timer remains. All
//! core handles are `Rc`-based, so drive them from a current-thread runtime
//! or a `LocalSet`.

use tangle_core::{Scheduler, SystemClock};

/// Wall-clock event loop for a core [`Scheduler`]
pub struct Driver {
    scheduler: Scheduler,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(SystemClock),
        }
    }

    /// The scheduler to build conditions, dispatchers, and futures on
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run one drain cycle without sleeping
    pub fn step(&self) {
        self.scheduler.run_due();
    }

    /// Drain and sleep until every timer has fired or been cancelled
    pub async fn run_until_idle(&self) {
        loop {
            self.scheduler.run_due();
            let Some(deadline) = self.scheduler.next_deadline() else {
                break;
            };
            tracing::debug!(?deadline, "scheduler waiting for next timer");
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
