//! Example demonstrating one container reused for values of changing types,
//! and swapping contents between containers.

use any_box::{AnyBox, cast_ref, downcast_ref};

fn main() {
    // A single slot whose contained type changes over time.
    let mut slot = AnyBox::new(12_i32);
    println!("slot as i32: {:?}", downcast_ref::<i32>(&slot));

    slot.set("now a string".to_string());
    println!("slot as i32: {:?}", downcast_ref::<i32>(&slot));
    println!("slot as String: {:?}", downcast_ref::<String>(&slot));

    // Swap contents between two differently-typed containers.
    let mut other = AnyBox::new(2.5_f64);
    slot.swap(&mut other);
    println!("slot now holds f64: {:?}", cast_ref::<f64>(&slot));
    println!("other now holds String: {:?}", cast_ref::<String>(&other));

    // Move the value into a fresh container, leaving the source empty.
    let moved = other.take();
    println!("other still holds a value: {}", other.has_value());
    println!("moved holds String: {:?}", cast_ref::<String>(&moved));

    // Emptying is explicit and idempotent.
    slot.reset();
    slot.reset();
    println!("slot after reset: has_value = {}", slot.has_value());
}
