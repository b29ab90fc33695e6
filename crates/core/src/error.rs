// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task error values
//!
//! Errors never cross asynchronous boundaries as panics; they travel as the
//! `Err` arm of a resolved future value, and consumers check the kind before
//! treating the value as a result.

use thiserror::Error;

/// Error-kind values a future can resolve with
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("worker '{0}' timed out")]
    WorkerTimeout(String),
    #[error("step failed: {0}")]
    StepFailed(String),
}
