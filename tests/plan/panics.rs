use std::panic::{self, AssertUnwindSafe};

use fault_rail::{protect, reraise, Fault, PanicPayload, Plan, ORIGINAL_ERROR_KEY, UNKNOWN_ERROR};

use crate::fixtures::Trace;

#[test]
fn finally_runs_while_a_panic_unwinds() {
    let trace = Trace::new();
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        Plan::run(|| panic!("not a fault"))
            .finally(|| {
                trace.push("finally");
                Ok(())
            })
            .execute()
    }));

    assert!(unwound.is_err());
    assert_eq!(trace.steps(), ["finally"]);
}

#[test]
fn protected_plans_dispatch_panics_as_unknown_errors() {
    let mut message = None;
    Plan::run_protected(|| panic!("hooray!"))
        .catch(UNKNOWN_ERROR, |err| {
            message = err.data_as::<&str>(ORIGINAL_ERROR_KEY).copied();
            Ok(())
        })
        .execute()
        .unwrap();

    assert_eq!(message, Some("hooray!"));
}

#[test]
fn protect_passes_ordinary_outcomes_through() {
    assert!(protect(|| Ok(())).is_ok());

    let fault = protect(|| Err(Fault::failure("plain"))).unwrap_err();
    assert!(matches!(fault, Fault::Failure(_)));
}

#[test]
fn protect_turns_formatted_panics_into_values() {
    let code = std::hint::black_box(500);
    let fault = protect(|| panic!("code {code}")).unwrap_err();
    let payload = fault.payload().unwrap();
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("code 500"));
}

#[test]
fn protected_non_message_panics_round_trip_through_reraise() {
    let mut adapted = None;
    let fault = Plan::run_protected(|| panic::panic_any(42_u8))
        .catch(UNKNOWN_ERROR, |err| {
            adapted = err.data(ORIGINAL_ERROR_KEY).cloned();
            Err(reraise(err))
        })
        .execute()
        .unwrap_err();

    let payload = fault.payload().unwrap();
    assert!(std::sync::Arc::ptr_eq(payload.value(), &adapted.unwrap()));

    let parked = payload.downcast_ref::<PanicPayload>().unwrap();
    assert_eq!(parked.downcast_cloned::<u8>(), Some(42));
}

#[test]
fn older_finally_callbacks_run_when_a_newer_one_panics() {
    let trace = Trace::new();
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        Plan::run(|| Ok(()))
            .finally(|| {
                trace.push("oldest");
                Ok(())
            })
            .finally(|| {
                trace.push("middle");
                Ok(())
            })
            .finally(|| panic!("cleanup blew up"))
            .execute()
    }));

    assert!(unwound.is_err());
    assert_eq!(trace.steps(), ["middle", "oldest"]);
}
