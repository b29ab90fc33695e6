//! Shared setup for the behavioral specs

pub use serde_json::json;
pub use std::cell::{Cell, RefCell};
pub use std::rc::Rc;
pub use std::time::Duration;
pub use tangle_core::{
    BooleanOperator, Condition, ConditionTree, Dispatcher, FakeClock, Future, ParallelCondition,
    Scheduler, TaskError, WorkUnit,
};

/// Fake-clock scheduler pair for deterministic scenarios
pub fn setup() -> (FakeClock, Scheduler) {
    let clock = FakeClock::new();
    let scheduler = Scheduler::new(clock.clone());
    (clock, scheduler)
}

/// Advance virtual time and drain everything that became due
pub fn advance(clock: &FakeClock, scheduler: &Scheduler, delta: Duration) {
    clock.advance(delta);
    scheduler.run_due();
}
