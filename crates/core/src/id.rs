// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default name generation for conditions and workers
//!
//! Names are process-wide and monotonically increasing. Counters are atomic
//! so naming stays well-defined even if handles cross threads one day.

use std::sync::atomic::{AtomicU64, Ordering};

static CONDITION_IDS: AtomicU64 = AtomicU64::new(0);
static WORKER_IDS: AtomicU64 = AtomicU64::new(0);

fn next(prefix: &str, counter: &AtomicU64) -> String {
    let n = counter.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, n)
}

/// Next default condition name (`condition-N`)
pub fn condition_name() -> String {
    next("condition", &CONDITION_IDS)
}

/// Next default worker name (`worker-N`)
pub fn worker_name() -> String {
    next("worker", &WORKER_IDS)
}
