//! A single-value container that can hold any cloneable type, with inline
//! storage for small values.
//!
//! This crate provides [`AnyBox`], a fixed-size box that stores a value of
//! an arbitrary type behind one handle, remembers the type at runtime, and
//! supports safe, type-checked extraction. Values no larger than two
//! pointers are stored inline in the container itself, so the common case of
//! boxing an integer, float or pointer-sized handle performs no heap
//! allocation at all.
//!
//! # Key features
//!
//! - **One handle for any type**: an `AnyBox` is always the same size, no
//!   matter what it holds
//! - **Small-value optimization**: values that fit two pointers live inline,
//!   larger or over-aligned values are boxed automatically
//! - **Value semantics**: cloning a container deep-clones the contained
//!   value; dropping it runs the value's destructor exactly once
//! - **Type-checked extraction**: exact runtime identity comparison, with
//!   both `Option`-returning and error-reporting cast forms
//! - **No dynamic dispatch**: a per-type table of plain function pointers
//!   substitutes for trait objects, keeping the container a plain value
//!
//! # Examples
//!
//! ## Storing and extracting values
//!
//! ```rust
//! use any_box::{AnyBox, cast_value, downcast_ref};
//!
//! let number = AnyBox::new(12_i32);
//! assert_eq!(downcast_ref::<i32>(&number), Some(&12));
//!
//! // The wrong type is reported, not coerced.
//! assert_eq!(downcast_ref::<f64>(&number), None);
//! assert!(cast_value::<String>(&number).is_err());
//! ```
//!
//! ## Reusing one container for different types
//!
//! ```rust
//! use std::any::TypeId;
//!
//! use any_box::{AnyBox, downcast_ref};
//!
//! let mut slot = AnyBox::new(12_i32);
//! assert_eq!(slot.type_id(), TypeId::of::<i32>());
//!
//! // Assigning a new value drops the previous one.
//! slot.set("hello".to_string());
//! assert_eq!(slot.type_id(), TypeId::of::<String>());
//! assert_eq!(downcast_ref::<String>(&slot).map(String::as_str), Some("hello"));
//! ```
//!
//! ## Taking the value back out
//!
//! ```rust
//! use any_box::{AnyBox, cast_into};
//!
//! let container = AnyBox::new(vec![1, 2, 3]);
//!
//! let items: Vec<i32> = cast_into(container).unwrap();
//! assert_eq!(items, [1, 2, 3]);
//! ```
//!
//! # Thread safety
//!
//! `AnyBox` is a plain value type: not internally synchronized, neither
//! [`Send`] nor [`Sync`]. The per-type operation tables it relies on are
//! process-wide, write-once constants and are freely shared across threads.

mod any;
mod cast;
mod error;
mod ops;
mod storage;

pub use any::AnyBox;
pub use cast::{cast_into, cast_mut, cast_ref, cast_value, downcast_mut, downcast_ref};
pub use error::Error;
