//! Condition tree and parallel fan-out specs

use crate::prelude::*;

#[test]
fn or_tree_waits_for_a_definite_true() {
    let (_, scheduler) = setup();
    let tree = ConditionTree::new(&scheduler);
    tree.set_boolean_operator(BooleanOperator::Or);
    let c1 = Condition::new(&scheduler);
    let c2 = Condition::new(&scheduler);
    tree.add_condition(c1.clone());
    tree.add_condition(c2.clone());

    c1.set_false();
    assert!(tree.is_not_set());
    c2.set_false();
    assert!(tree.is_false());

    tree.reset();
    c1.set_false();
    assert!(tree.is_not_set());
    c2.set_true();
    assert!(tree.is_true());
}

#[test]
fn and_tree_short_circuits_on_the_first_false() {
    let (_, scheduler) = setup();
    let tree = ConditionTree::new(&scheduler);
    tree.set_boolean_operator(BooleanOperator::And);
    let c3 = Condition::new(&scheduler);
    let c4 = Condition::new(&scheduler);
    tree.add_condition(c3.clone());
    tree.add_condition(c4);

    c3.set_false();
    assert!(tree.is_false());
}

#[test]
fn a_resolved_tree_ignores_children_until_reset() {
    let (_, scheduler) = setup();
    let tree = ConditionTree::new(&scheduler);
    tree.set_boolean_operator(BooleanOperator::Or);
    let c1 = Condition::new(&scheduler);
    let c2 = Condition::new(&scheduler);
    tree.add_condition(c1.clone());
    tree.add_condition(c2.clone());

    c1.set_true();
    assert!(tree.is_true());
    c2.set_false();
    assert!(tree.is_true());

    tree.reset();
    assert!(tree.is_not_set());
    assert!(c1.is_not_set());
    assert!(c2.is_not_set());
}

#[test]
fn parallel_or_ignores_an_early_false_and_takes_the_later_true() {
    let (clock, scheduler) = setup();

    let make_unit = |delay: Duration, outcome: bool| {
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
            make_unit(Duration::from_millis(200), false),
            make_unit(Duration::from_millis(300), true),
        ],
        Duration::ZERO,
    );
    parallel.set_boolean_operator(BooleanOperator::Or);

    parallel.execute();
    scheduler.run_due();

    advance(&clock, &scheduler, Duration::from_millis(200));
    assert!(parallel.is_not_set());

    advance(&clock, &scheduler, Duration::from_millis(100));
    assert!(parallel.is_true());
}
