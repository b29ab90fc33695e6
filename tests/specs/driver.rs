//! End-to-end specs through the tokio driver

use crate::prelude::*;
use tangle_runtime::Driver;

#[tokio::test]
async fn a_parallel_or_resolves_on_real_timers() {
    let driver = Driver::new();
    let scheduler = driver.scheduler().clone();

    let settle = |delay: Duration, outcome: bool| {
        let scheduler = scheduler.clone();
        WorkUnit::call(move |condition: &Condition, _| {
            let condition = condition.clone();
            scheduler.schedule_after(delay, move || {
                if outcome {
                    condition.set_true();
                } else {
                    condition.set_false();
                }
            });
        })
    };

    let parallel = ParallelCondition::new(
        &scheduler,
        vec![
            settle(Duration::from_millis(10), false),
            settle(Duration::from_millis(20), true),
        ],
        Duration::ZERO,
    );
    parallel.set_boolean_operator(BooleanOperator::Or);
    parallel.execute();

    driver.run_until_idle().await;
    assert!(parallel.is_true());
}

#[tokio::test]
async fn pooled_tasks_run_to_completion_under_the_driver() {
    let driver = Driver::new();
    let dispatcher = Dispatcher::single(driver.scheduler());

    let scheduler = driver.scheduler().clone();
    let first = dispatcher.submit(
        move |f| {
            let f = f.clone();
            scheduler.schedule_after(Duration::from_millis(10), move || f.set_value(1));
        },
        Duration::ZERO,
    );
    let second = dispatcher.submit(|f| f.set_value(2), Duration::ZERO);

    driver.run_until_idle().await;
    assert_eq!(first.value(), Some(Ok(json!(1))));
    assert_eq!(second.value(), Some(Ok(json!(2))));
}

#[tokio::test]
async fn a_stuck_task_errors_out_and_frees_the_pool() {
    let driver = Driver::new();
    let dispatcher = Dispatcher::single(driver.scheduler());

    let stuck = dispatcher.submit(|_| {}, Duration::from_millis(20));
    let queued = dispatcher.submit(|f| f.set_value("after"), Duration::ZERO);

    driver.run_until_idle().await;
    assert!(matches!(stuck.value(), Some(Err(TaskError::WorkerTimeout(_)))));
    assert_eq!(queued.value(), Some(Ok(json!("after"))));
}
