//! Dispatcher pool specs

use crate::prelude::*;

/// Tracks task starts so ordering can be asserted
fn logging_task(
    scheduler: &Scheduler,
    log: &Rc<RefCell<Vec<&'static str>>>,
    name: &'static str,
    delay: Duration,
) -> impl FnOnce(&Future) {
    let scheduler = scheduler.clone();
    let log = log.clone();
    move |future: &Future| {
        log.borrow_mut().push(name);
        let future = future.clone();
        scheduler.schedule_after(delay, move || future.set_value(name));
    }
}

#[test]
fn the_second_task_waits_for_the_first_future() {
    let (clock, scheduler) = setup();
    let dispatcher = Dispatcher::single(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = dispatcher.submit(
        logging_task(&scheduler, &log, "first", Duration::from_millis(30)),
        Duration::ZERO,
    );
    dispatcher.submit(
        logging_task(&scheduler, &log, "second", Duration::from_millis(30)),
        Duration::ZERO,
    );

    scheduler.run_due();
    assert_eq!(*log.borrow(), vec!["first"]);

    advance(&clock, &scheduler, Duration::from_millis(30));
    assert_eq!(first.value(), Some(Ok(json!("first"))));
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn a_slow_task_times_out_and_its_late_value_is_dropped() {
    let (clock, scheduler) = setup();
    let dispatcher = Dispatcher::single(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    let slow = dispatcher.submit(
        logging_task(&scheduler, &log, "slow", Duration::from_millis(200)),
        Duration::from_millis(100),
    );
    scheduler.run_due();

    advance(&clock, &scheduler, Duration::from_millis(100));
    assert!(matches!(slow.value(), Some(Err(TaskError::WorkerTimeout(_)))));

    // The replacement worker keeps the pool serving new work
    let next = dispatcher.submit(
        logging_task(&scheduler, &log, "next", Duration::from_millis(10)),
        Duration::ZERO,
    );
    scheduler.run_due();
    advance(&clock, &scheduler, Duration::from_millis(10));
    assert_eq!(next.value(), Some(Ok(json!("next"))));

    // The slow task's own resolution at 200ms changes nothing
    advance(&clock, &scheduler, Duration::from_millis(90));
    assert!(slow.value().is_some_and(|v| v.is_err()));
}

#[test]
fn empty_notifications_follow_the_queue_drain() {
    let (clock, scheduler) = setup();
    let dispatcher = Dispatcher::new(&scheduler, 2);
    let drained = Rc::new(Cell::new(0));

    let count = drained.clone();
    dispatcher.add_is_empty_listener(move |_| count.set(count.get() + 1));

    let log = Rc::new(RefCell::new(Vec::new()));
    for name in ["a", "b", "c"] {
        dispatcher.submit(
            logging_task(&scheduler, &log, name, Duration::from_millis(10)),
            Duration::ZERO,
        );
    }
    // Two dispatched immediately, one still queued
    assert_eq!(drained.get(), 2);
    assert_eq!(dispatcher.pending_count(), 1);

    scheduler.run_due();
    advance(&clock, &scheduler, Duration::from_millis(10));
    assert_eq!(dispatcher.pending_count(), 0);
    assert!(drained.get() > 2);
}
