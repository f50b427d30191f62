//! Example demonstrating basic usage of `AnyBox`.
//!
//! This shows construction, type inspection, the cast family, and value
//! semantics of clone and swap.

use std::any::TypeId;

use any_box::{AnyBox, cast_into, cast_value, downcast_mut, downcast_ref};

fn main() {
    // Store values of different types behind the same handle type.
    let number = AnyBox::new(42_u32);
    let text = AnyBox::new("Hello".to_string());

    println!("number holds u32: {}", number.type_id() == TypeId::of::<u32>());
    println!("text holds String: {}", text.type_id() == TypeId::of::<String>());

    // Checked extraction: the wrong type is reported, not coerced.
    println!("number as u32: {:?}", downcast_ref::<u32>(&number));
    println!("number as i32: {:?}", downcast_ref::<i32>(&number));

    // Mutate in place through a typed handle.
    let mut list = AnyBox::new(vec![1, 2, 3]);
    if let Some(items) = downcast_mut::<Vec<i32>>(&mut list) {
        items.push(4);
    }
    println!("list after push: {:?}", cast_value::<Vec<i32>>(&list).unwrap());

    // Clones are independent deep copies.
    let copy = list.clone();
    if let Some(items) = downcast_mut::<Vec<i32>>(&mut list) {
        items.clear();
    }
    println!("original cleared: {:?}", cast_value::<Vec<i32>>(&list).unwrap());
    println!("copy unaffected: {:?}", cast_value::<Vec<i32>>(&copy).unwrap());

    // Consume the container to take the value back out.
    let owned: String = cast_into(text).unwrap();
    println!("extracted: {owned}");
}
