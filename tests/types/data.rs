use std::sync::Arc;

use fault_rail::{get_data, set_data, set_shared_data, DataKey, DataValue, Fault};

use crate::fixtures::{APPLE_ERROR, ROCK_ERROR};

#[derive(Debug, PartialEq)]
struct Receipt {
    id: u32,
}

#[test]
fn values_are_retrievable_by_key_and_type() {
    let key = DataKey::alloc();
    let err = APPLE_ERROR.wrap_with("worm", [set_data(key, Receipt { id: 9 })]);

    assert_eq!(err.data_as::<Receipt>(key), Some(&Receipt { id: 9 }));
    assert!(err.data_as::<u32>(key).is_none());
    assert!(err.data(DataKey::alloc()).is_none());
}

#[test]
fn shared_values_keep_their_identity() {
    let key = DataKey::alloc();
    let shared: DataValue = Arc::new(Receipt { id: 1 });
    let err = APPLE_ERROR.wrap_with("worm", [set_shared_data(key, shared.clone())]);

    assert!(Arc::ptr_eq(err.data(key).unwrap(), &shared));
}

#[test]
fn later_entries_replace_earlier_ones_for_the_same_key() {
    let key = DataKey::alloc();
    let err = APPLE_ERROR.wrap_with("worm", [set_data(key, 1_u8), set_data(key, 2_u8)]);
    assert_eq!(err.data_as::<u8>(key), Some(&2));
}

#[test]
fn lookup_falls_back_to_wrapped_classified_errors() {
    let key = DataKey::alloc();
    let inner = APPLE_ERROR.wrap_with("worm", [set_data(key, "inner value")]);
    let outer = ROCK_ERROR.wrap(inner);

    assert_eq!(outer.data_as::<&str>(key), Some(&"inner value"));
}

#[test]
fn outer_entries_shadow_inner_ones() {
    let key = DataKey::alloc();
    let inner = APPLE_ERROR.wrap_with("worm", [set_data(key, 1_i64)]);
    let outer = ROCK_ERROR.wrap_with(inner, [set_data(key, 2_i64)]);

    assert_eq!(outer.data_as::<i64>(key), Some(&2));
}

#[test]
fn idempotent_wrap_drops_new_entries() {
    let key = DataKey::alloc();
    let original = APPLE_ERROR.new_error("worm");
    let again = APPLE_ERROR.wrap_with(original.clone(), [set_data(key, 5_u8)]);

    assert!(again.ptr_eq(&original));
    assert!(again.data(key).is_none());
}

#[test]
fn get_data_reads_only_classified_faults() {
    let key = DataKey::alloc();
    let fault = Fault::Error(APPLE_ERROR.wrap_with("worm", [set_data(key, 3_u16)]));
    assert!(get_data(&fault, key).is_some());

    let plain = Fault::failure("plain");
    assert!(get_data(&plain, key).is_none());
}
