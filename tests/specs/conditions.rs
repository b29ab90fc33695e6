//! Condition and future specs
//!
//! Idempotent transitions, single notifications, first-write-wins.

use crate::prelude::*;

#[test]
fn repeated_set_true_notifies_exactly_once() {
    let (_, scheduler) = setup();
    let condition = Condition::new(&scheduler);
    let notifications = Rc::new(Cell::new(0));

    let count = notifications.clone();
    condition.wait_for_state_change(move |_| count.set(count.get() + 1));

    condition.set_true();
    condition.set_true();
    assert_eq!(notifications.get(), 1);
}

#[test]
fn a_condition_survives_set_reset_cycles() {
    let (_, scheduler) = setup();
    let condition = Condition::new(&scheduler);
    let trues = Rc::new(Cell::new(0));

    let count = trues.clone();
    condition.wait_for_true(move |_| count.set(count.get() + 1));

    for _ in 0..3 {
        condition.set_true();
        condition.reset();
    }
    scheduler.run_due();
    assert_eq!(trues.get(), 3);
}

#[test]
fn a_timeout_reports_false_before_the_timeout_notification() {
    let (clock, scheduler) = setup();
    let condition = Condition::new(&scheduler);
    let order = Rc::new(RefCell::new(Vec::new()));

    let log = order.clone();
    condition.wait_for_state_change(move |c| log.borrow_mut().push(format!("change:{:?}", c.current_value())));
    let log = order.clone();
    condition.wait_for_timeout(move |_| log.borrow_mut().push("timeout".into()));

    condition.set_timeout(Duration::from_millis(50));
    advance(&clock, &scheduler, Duration::from_millis(50));

    assert_eq!(*order.borrow(), vec!["change:False", "timeout"]);
}

#[test]
fn future_set_value_is_first_write_wins() {
    let (_, scheduler) = setup();
    let future = Future::new(&scheduler);

    future.set_value(1);
    future.set_value(2);
    assert_eq!(future.value(), Some(Ok(json!(1))));
}

#[test]
fn an_already_resolved_future_still_notifies_late_observers_once() {
    let (_, scheduler) = setup();
    let future = Future::new(&scheduler);
    future.set_value("ready");

    let seen = Rc::new(Cell::new(0));
    let count = seen.clone();
    future.wait_for_set(move |f| {
        assert_eq!(f.value(), Some(Ok(json!("ready"))));
        count.set(count.get() + 1);
    });

    scheduler.run_due();
    assert_eq!(seen.get(), 1);
}
