use std::io;

use fault_rail::{Fault, FaultResult, ResultExt};

use crate::fixtures::{APPLE_ERROR, FRUIT_ERROR, ROCK_ERROR};

fn read_missing() -> Result<String, io::Error> {
    Err(io::Error::from(io::ErrorKind::NotFound))
}

#[test]
fn ok_values_pass_through() {
    let value: Result<u8, io::Error> = Ok(4);
    assert_eq!(value.classify(*ROCK_ERROR).unwrap(), 4);
}

#[test]
fn errors_gain_the_requested_class() {
    let err = read_missing().classify(*ROCK_ERROR).unwrap_err();
    assert!(err.is(*ROCK_ERROR));
    assert!(err.cause().downcast_ref::<io::Error>().is_some());
}

#[test]
fn already_classified_errors_are_not_rewrapped() {
    let original = APPLE_ERROR.new_error("worm");
    let result: Result<(), _> = Err(original.clone());
    let err = result.classify(*FRUIT_ERROR).unwrap_err();
    assert!(err.ptr_eq(&original));
}

#[test]
fn exemptions_are_honoured() {
    let original = APPLE_ERROR.new_error("worm");
    let result: Result<(), _> = Err(original.clone());
    let err = result.classify_exempt(*ROCK_ERROR, &[*FRUIT_ERROR]).unwrap_err();
    assert!(err.ptr_eq(&original));
}

#[test]
fn classified_results_flow_into_fault_results() {
    fn load() -> FaultResult<String> {
        Ok(read_missing().classify(*ROCK_ERROR)?)
    }

    let fault = load().unwrap_err();
    assert!(matches!(fault, Fault::Error(_)));
    assert!(fault.is(*ROCK_ERROR));
}
