use fault_rail::{raise, Fault, Plan, SYSTEM_ERROR};

use crate::fixtures::{Trace, APPLE_ERROR, FRUIT_ERROR, GRAPE_ERROR, ROCK_ERROR};

#[test]
fn normal_flow_skips_handlers() {
    let trace = Trace::new();
    let outcome = Plan::run(|| {
        trace.push("block");
        Ok(())
    })
    .catch_all(|_| {
        trace.push("catch all");
        Ok(())
    })
    .finally(|| {
        trace.push("finally");
        Ok(())
    })
    .execute();

    assert!(outcome.is_ok());
    assert_eq!(trace.steps(), ["block", "finally"]);
}

#[test]
fn error_in_block_is_caught_by_wildcard() {
    let trace = Trace::new();
    let outcome = Plan::run(|| {
        trace.push("block");
        Err::<(), _>(Fault::failure("any error"))?;
        trace.push("unreachable");
        Ok(())
    })
    .catch_all(|fault| {
        trace.push(format!("caught {fault}"));
        Ok(())
    })
    .finally(|| {
        trace.push("finally");
        Ok(())
    })
    .execute();

    assert!(outcome.is_ok());
    assert_eq!(trace.steps(), ["block", "caught any error", "finally"]);
}

#[test]
fn crash_in_handler_propagates_after_finally() {
    let trace = Trace::new();
    let outcome = Plan::run(|| Err(Fault::failure("first")))
        .catch_all(|_| {
            trace.push("catch all");
            Err(Fault::failure("second"))
        })
        .finally(|| {
            trace.push("finally");
            Ok(())
        })
        .execute();

    assert_eq!(outcome.unwrap_err().to_string(), "second");
    assert_eq!(trace.steps(), ["catch all", "finally"]);
}

#[test]
fn uncaught_errors_leave_through_finally() {
    let trace = Trace::new();
    let outcome = Plan::run(|| Err(Fault::Error(ROCK_ERROR.new_error("heavy"))))
        .catch(*FRUIT_ERROR, |_| {
            trace.push("fruit");
            Ok(())
        })
        .finally(|| {
            trace.push("finally");
            Ok(())
        })
        .execute();

    assert!(outcome.unwrap_err().is(*ROCK_ERROR));
    assert_eq!(trace.steps(), ["finally"]);
}

#[test]
fn catch_by_ancestor_class() {
    let trace = Trace::new();
    Plan::run(|| raise!(*APPLE_ERROR, "worm in {}", "core"))
        .catch(*FRUIT_ERROR, |err| {
            assert!(err.is(*APPLE_ERROR));
            trace.push("fruit");
            Ok(())
        })
        .execute()
        .unwrap();

    assert_eq!(trace.steps(), ["fruit"]);
}

#[test]
fn catch_by_specific_class_skips_siblings() {
    let trace = Trace::new();
    Plan::run(|| raise!(*APPLE_ERROR, "worm"))
        .catch(*GRAPE_ERROR, |_| {
            trace.push("grape");
            Ok(())
        })
        .catch(*APPLE_ERROR, |_| {
            trace.push("apple");
            Ok(())
        })
        .execute()
        .unwrap();

    assert_eq!(trace.steps(), ["apple"]);
}

#[test]
fn first_matching_entry_wins_in_registration_order() {
    let trace = Trace::new();
    Plan::run(|| raise!(*APPLE_ERROR, "worm"))
        .catch(*FRUIT_ERROR, |_| {
            trace.push("fruit");
            Ok(())
        })
        .catch(*APPLE_ERROR, |_| {
            trace.push("apple");
            Ok(())
        })
        .catch_all(|_| {
            trace.push("catch all");
            Ok(())
        })
        .execute()
        .unwrap();

    assert_eq!(trace.steps(), ["fruit"]);
}

#[test]
fn wildcard_receives_classified_errors_unchanged() {
    let err = GRAPE_ERROR.new_error("raisin");
    let mut seen = None;
    Plan::run(|| Err(Fault::Error(err.clone())))
        .catch_all(|fault| {
            seen = fault.into_error().ok();
            Ok(())
        })
        .execute()
        .unwrap();

    assert!(seen.unwrap().ptr_eq(&err));
}

#[test]
fn plain_failure_without_wildcard_propagates_untouched() {
    let trace = Trace::new();
    let outcome = Plan::run(|| Err(Fault::failure("raw")))
        .catch(SYSTEM_ERROR, |_| {
            trace.push("system");
            Ok(())
        })
        .execute();

    let fault = outcome.unwrap_err();
    assert!(matches!(fault, Fault::Failure(_)));
    assert_eq!(fault.to_string(), "raw");
    assert!(trace.steps().is_empty());
}

#[test]
fn handlers_are_not_retried_after_raising() {
    let trace = Trace::new();
    let outcome = Plan::run(|| raise!(*APPLE_ERROR, "worm"))
        .catch(*APPLE_ERROR, |_| {
            trace.push("apple");
            raise!(*GRAPE_ERROR, "raisin")
        })
        .catch(*GRAPE_ERROR, |_| {
            trace.push("grape");
            Ok(())
        })
        .execute();

    assert!(outcome.unwrap_err().is(*GRAPE_ERROR));
    assert_eq!(trace.steps(), ["apple"]);
}

#[test]
fn nested_plans_propagate_outward() {
    let trace = Trace::new();
    Plan::run(|| {
        Plan::run(|| raise!(*APPLE_ERROR, "worm"))
            .catch(*ROCK_ERROR, |_| {
                trace.push("inner rock");
                Ok(())
            })
            .finally(|| {
                trace.push("inner finally");
                Ok(())
            })
            .execute()
    })
    .catch(*FRUIT_ERROR, |_| {
        trace.push("outer fruit");
        Ok(())
    })
    .execute()
    .unwrap();

    assert_eq!(trace.steps(), ["inner finally", "outer fruit"]);
}

#[test]
fn handler_can_borrow_mutable_state() {
    let mut count = 0;
    Plan::run(|| raise!(*APPLE_ERROR, "worm"))
        .catch(*APPLE_ERROR, |_| {
            count += 1;
            Ok(())
        })
        .execute()
        .unwrap();
    assert_eq!(count, 1);
}
