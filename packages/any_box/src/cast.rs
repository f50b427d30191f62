use std::any;
use std::mem::ManuallyDrop;

use crate::AnyBox;
use crate::error::{Error, Result};
use crate::storage::requires_heap;

/// Returns a shared reference to the contained value if it is exactly of
/// type `T`.
///
/// Absent on a type mismatch or an empty container; no coercion of any kind
/// is attempted. Never panics.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, downcast_ref};
///
/// let value = AnyBox::new(12_i32);
/// assert_eq!(downcast_ref::<i32>(&value), Some(&12));
/// assert_eq!(downcast_ref::<u32>(&value), None);
/// assert_eq!(downcast_ref::<i32>(&AnyBox::empty()), None);
/// ```
#[must_use]
pub fn downcast_ref<T: 'static>(container: &AnyBox) -> Option<&T> {
    if !container.is_type::<T>() {
        return None;
    }

    // SAFETY: The identity check passed, so the container holds a live T.
    let ptr = unsafe { container.value_ptr::<T>() };

    // SAFETY: The pointer is valid for the lifetime of the container borrow.
    Some(unsafe { &*ptr })
}

/// Returns an exclusive reference to the contained value if it is exactly of
/// type `T`.
///
/// Mutations through the reference are visible on subsequent extractions.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, downcast_mut, downcast_ref};
///
/// let mut value = AnyBox::new(vec![1, 2, 3]);
///
/// if let Some(items) = downcast_mut::<Vec<i32>>(&mut value) {
///     items.push(4);
/// }
///
/// assert_eq!(downcast_ref::<Vec<i32>>(&value), Some(&vec![1, 2, 3, 4]));
/// ```
#[must_use]
pub fn downcast_mut<T: 'static>(container: &mut AnyBox) -> Option<&mut T> {
    if !container.is_type::<T>() {
        return None;
    }

    // SAFETY: The identity check passed, so the container holds a live T.
    let ptr = unsafe { container.value_ptr_mut::<T>() };

    // SAFETY: The exclusive borrow of the container makes the access unique.
    Some(unsafe { &mut *ptr })
}

/// Returns a shared reference to the contained value, reporting a
/// [`Error::TypeMismatch`] if it is not exactly of type `T`.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, Error, cast_ref};
///
/// let value = AnyBox::new("hello".to_string());
/// assert_eq!(cast_ref::<String>(&value).unwrap(), "hello");
/// assert!(matches!(
///     cast_ref::<i32>(&value),
///     Err(Error::TypeMismatch { .. })
/// ));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the container is empty or holds a
/// value of a different type.
pub fn cast_ref<T: 'static>(container: &AnyBox) -> Result<&T> {
    downcast_ref(container).ok_or_else(|| mismatch::<T>(container))
}

/// Returns an exclusive reference to the contained value, reporting a
/// [`Error::TypeMismatch`] if it is not exactly of type `T`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the container is empty or holds a
/// value of a different type.
pub fn cast_mut<T: 'static>(container: &mut AnyBox) -> Result<&mut T> {
    if !container.is_type::<T>() {
        return Err(mismatch::<T>(container));
    }

    // SAFETY: The identity check passed, so the container holds a live T.
    let ptr = unsafe { container.value_ptr_mut::<T>() };

    // SAFETY: The exclusive borrow of the container makes the access unique.
    Ok(unsafe { &mut *ptr })
}

/// Returns a clone of the contained value, reporting a
/// [`Error::TypeMismatch`] if it is not exactly of type `T`.
///
/// The container keeps its value; the caller receives an independent copy.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, cast_value};
///
/// let value = AnyBox::new(12_i32);
/// assert_eq!(cast_value::<i32>(&value).unwrap(), 12);
/// assert!(value.has_value());
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the container is empty or holds a
/// value of a different type.
pub fn cast_value<T: Clone + 'static>(container: &AnyBox) -> Result<T> {
    cast_ref(container).cloned()
}

/// Consumes the container and moves the contained value out, if it is
/// exactly of type `T`.
///
/// On a mismatch the intact container is handed back, so the value is never
/// destroyed by a failed extraction. This mirrors the [`Box::downcast`]
/// convention for consuming downcasts.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, cast_into};
///
/// let value = AnyBox::new("hello".to_string());
/// let text: String = cast_into(value).unwrap();
/// assert_eq!(text, "hello");
///
/// let value = AnyBox::new(12_i32);
/// let rejected = cast_into::<String>(value).unwrap_err();
/// assert!(rejected.has_value());
/// ```
///
/// # Errors
///
/// Returns the container unchanged if it is empty or holds a value of a
/// different type.
pub fn cast_into<T: 'static>(container: AnyBox) -> std::result::Result<T, AnyBox> {
    if !container.is_type::<T>() {
        return Err(container);
    }

    // The value is about to be moved out by hand, so the container's own
    // drop must be suppressed to avoid finalizing it a second time.
    let mut container = ManuallyDrop::new(container);

    if requires_heap::<T>() {
        // SAFETY: The identity check passed and T is in heap mode.
        let ptr = unsafe { container.value_ptr_mut::<T>() };

        // SAFETY: The container's drop is suppressed, so this takes sole
        // ownership of the allocation.
        let boxed = unsafe { Box::from_raw(ptr) };
        Ok(*boxed)
    } else {
        // SAFETY: The identity check passed and T is in inline mode.
        let ptr = unsafe { container.value_ptr::<T>() };

        // SAFETY: Reading relocates the value out; the suppressed drop never
        // observes the vacated cell, so the value is finalized exactly once.
        let value = unsafe { ptr.read() };
        Ok(value)
    }
}

/// Builds the mismatch error for a failed extraction of type `T`.
fn mismatch<T: 'static>(container: &AnyBox) -> Error {
    Error::TypeMismatch {
        requested: any::type_name::<T>(),
        actual: container.type_id(),
    }
}
