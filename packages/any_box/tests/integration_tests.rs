//! Integration tests for the `any_box` package.
//!
//! These exercise the public API end to end: construction in both storage
//! modes, every cast form, value semantics of clone/move/swap, and
//! destructor accounting.

use std::any::TypeId;
use std::cell::Cell;
use std::rc::Rc;

use any_box::{
    AnyBox, Error, cast_into, cast_mut, cast_ref, cast_value, downcast_mut, downcast_ref,
};

/// A struct that comfortably exceeds the two-pointer inline capacity.
#[derive(Clone, Debug, PartialEq)]
struct LargeRecord {
    name: String,
    index: i32,
    ratio: f64,
}

#[test]
fn empty_container_reports_no_type() {
    let empty = AnyBox::empty();
    assert!(!empty.has_value());
    assert_eq!(empty.type_id(), TypeId::of::<()>());
}

#[test]
fn integer_round_trip() {
    let container = AnyBox::new(12_i32);
    assert_eq!(cast_value::<i32>(&container).unwrap(), 12);

    let copy = container.clone();
    assert_eq!(cast_value::<i32>(&copy).unwrap(), 12);
}

#[test]
fn copy_then_reassign_destroys_previous_value_once() {
    let drops = Rc::new(Cell::new(0_u32));

    #[derive(Clone)]
    struct Tracked(Rc<Cell<u32>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let mut container = AnyBox::new(Tracked(Rc::clone(&drops)));
    let tracked_type = container.type_id();

    // Assign a string into the same container; the tracked value must be
    // destroyed exactly once.
    container.set("hello".to_string());
    assert_eq!(drops.get(), 1);
    assert_ne!(container.type_id(), tracked_type);
    assert_eq!(container.type_id(), TypeId::of::<String>());
    assert_eq!(
        downcast_ref::<String>(&container).map(String::as_str),
        Some("hello")
    );
}

#[test]
fn large_struct_is_extractable_and_mutable_through_handle() {
    let record = LargeRecord {
        name: "this is a test string".to_string(),
        index: 23,
        ratio: 3.14,
    };

    let mut container = AnyBox::new(record.clone());
    assert_eq!(container.type_id(), TypeId::of::<LargeRecord>());

    // The wrong type stays absent without disturbing the stored value.
    assert_eq!(downcast_ref::<String>(&container), None);
    assert_eq!(downcast_ref::<LargeRecord>(&container), Some(&record));

    // Mutation through the handle is visible on subsequent extraction.
    downcast_mut::<LargeRecord>(&mut container)
        .expect("type matches")
        .index = 14;

    let extracted = cast_value::<LargeRecord>(&container).unwrap();
    assert_eq!(extracted.index, 14);
    assert_eq!(extracted.name, "this is a test string");
}

#[test]
fn clone_of_heap_value_is_independent() {
    let original = AnyBox::new(vec!["one".to_string(), "two".to_string()]);
    let mut copy = original.clone();

    cast_mut::<Vec<String>>(&mut copy)
        .expect("type matches")
        .push("three".to_string());

    assert_eq!(cast_ref::<Vec<String>>(&original).unwrap().len(), 2);
    assert_eq!(cast_ref::<Vec<String>>(&copy).unwrap().len(), 3);
}

#[test]
fn swap_containers_of_different_types() {
    let mut int_container = AnyBox::new(1_i32);
    let mut string_container = AnyBox::new("this is a test string".to_string());

    int_container.swap(&mut string_container);

    assert_eq!(int_container.type_id(), TypeId::of::<String>());
    assert_eq!(
        cast_ref::<String>(&int_container).unwrap(),
        "this is a test string"
    );
    assert_eq!(string_container.type_id(), TypeId::of::<i32>());
    assert_eq!(cast_value::<i32>(&string_container).unwrap(), 1);

    // Swap is its own inverse.
    int_container.swap(&mut string_container);
    assert_eq!(cast_value::<i32>(&int_container).unwrap(), 1);
    assert_eq!(
        cast_ref::<String>(&string_container).unwrap(),
        "this is a test string"
    );
}

#[test]
fn take_transfers_ownership_without_copying() {
    let shared = Rc::new(42_i32);
    let mut container = AnyBox::new(Rc::clone(&shared));
    assert_eq!(Rc::strong_count(&shared), 2);

    let taken = container.take();
    assert!(!container.has_value());
    // A move is a transfer, not a clone.
    assert_eq!(Rc::strong_count(&shared), 2);

    assert_eq!(**cast_ref::<Rc<i32>>(&taken).unwrap(), 42);
}

#[test]
fn shared_ownership_counts_track_clones_and_resets() {
    let shared = Rc::new("payload".to_string());
    assert_eq!(Rc::strong_count(&shared), 1);

    let container = AnyBox::new(Rc::clone(&shared));
    assert_eq!(Rc::strong_count(&shared), 2);

    let copy = container.clone();
    assert_eq!(Rc::strong_count(&shared), 3);

    drop(copy);
    assert_eq!(Rc::strong_count(&shared), 2);

    let mut container = container;
    container.reset();
    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn reset_is_idempotent() {
    let mut container = AnyBox::new("value".to_string());

    container.reset();
    assert!(!container.has_value());
    assert_eq!(container.type_id(), TypeId::of::<()>());

    container.reset();
    assert!(!container.has_value());
    assert_eq!(container.type_id(), TypeId::of::<()>());
}

#[test]
fn cast_into_moves_value_out() {
    let shared = Rc::new(7_u8);
    let container = AnyBox::new(Rc::clone(&shared));
    assert_eq!(Rc::strong_count(&shared), 2);

    let extracted: Rc<u8> = cast_into(container).unwrap();
    // Extraction relocates; it does not clone.
    assert_eq!(Rc::strong_count(&shared), 2);
    assert_eq!(*extracted, 7);
}

#[test]
fn cast_into_rejection_preserves_the_value() {
    let container = AnyBox::new("keep me".to_string());

    let rejected = cast_into::<i32>(container).unwrap_err();
    assert_eq!(
        downcast_ref::<String>(&rejected).map(String::as_str),
        Some("keep me")
    );
}

#[test]
fn mismatch_error_is_inspectable() {
    let container = AnyBox::new(2.5_f64);

    match cast_ref::<i32>(&container) {
        Err(Error::TypeMismatch { requested, actual }) => {
            assert!(requested.contains("i32"));
            assert_eq!(actual, TypeId::of::<f64>());
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}

#[test]
fn float_and_pointer_values_round_trip() {
    let float_container = AnyBox::new(3.14_f64);
    assert!((cast_value::<f64>(&float_container).unwrap() - 3.14).abs() < f64::EPSILON);

    let text: &'static str = "this is a raw string";
    let str_container = AnyBox::new(text);
    assert_eq!(cast_value::<&'static str>(&str_container).unwrap(), text);
}

#[test]
fn container_can_hold_another_container() {
    let inner = AnyBox::new(5_u16);
    let outer = AnyBox::new(inner);

    let inner_again = cast_into::<AnyBox>(outer).unwrap();
    assert_eq!(cast_value::<u16>(&inner_again).unwrap(), 5);
}
