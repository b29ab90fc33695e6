//! tangle-core: Single-threaded asynchronous coordination primitives
//!
//! This crate provides:
//! - Tri-state conditions, boolean condition trees, and parallel fan-out
//! - One-shot futures carrying JSON task values
//! - A worker pool dispatcher with per-task timeouts and step sequencing
//! - A deterministic timer scheduler driven by an injected clock

pub mod clock;
pub mod id;

pub mod scheduler;
pub mod signal;

// Coordination primitives (order matters for dependencies)
pub mod condition;
pub mod tree;
pub mod parallel;
pub mod error;
pub mod future;
pub mod task;
pub mod sequence;
pub mod worker;
pub mod dispatcher;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use condition::{Condition, ConditionState};
pub use dispatcher::Dispatcher;
pub use error::TaskError;
pub use future::{Future, TaskResult, TaskValue};
pub use parallel::{ParallelCondition, WorkUnit};
pub use scheduler::{Scheduler, TimerId};
pub use sequence::{ChainStep, Next, SequenceStep};
pub use signal::{ListenerId, Signal};
pub use task::{TaskFn, WorkerTask};
pub use tree::{BooleanOperator, ConditionTree, TreeNode};
pub use worker::Worker;
