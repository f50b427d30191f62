use std::any::TypeId;
use std::fmt;
use std::mem;

use crate::ops::TypeOps;
use crate::storage::{StorageCell, requires_heap};

/// A single-value container that can hold an instance of any cloneable type,
/// remembers that type at runtime, and supports type-checked extraction.
///
/// Values no larger than two pointers (and no more strictly aligned) are
/// stored inline in the container itself; everything else is boxed. The mode
/// is decided per type at compile time and is invisible to callers.
///
/// Extraction goes through the free functions of this crate:
/// [`downcast_ref()`][crate::downcast_ref] and
/// [`downcast_mut()`][crate::downcast_mut] for non-panicking access,
/// [`cast_ref()`][crate::cast_ref], [`cast_mut()`][crate::cast_mut] and
/// [`cast_value()`][crate::cast_value] for error-reporting access, and
/// [`cast_into()`][crate::cast_into] to consume the container and take the
/// value out.
///
/// # Example
///
/// ```rust
/// use any_box::{AnyBox, downcast_ref};
///
/// let mut value = AnyBox::new(12_i32);
/// assert_eq!(downcast_ref::<i32>(&value), Some(&12));
///
/// // Assigning a differently-typed value drops the previous one.
/// value.set("hello".to_string());
/// assert_eq!(downcast_ref::<i32>(&value), None);
/// assert_eq!(downcast_ref::<String>(&value).map(String::as_str), Some("hello"));
/// ```
///
/// # Thread safety
///
/// `AnyBox` is a plain value type with no internal synchronization. It is
/// neither [`Send`] nor [`Sync`]: the contained type is erased, so the
/// container cannot vouch for any thread affinity on its behalf.
pub struct AnyBox {
    /// Operation table of the contained type; `None` iff the container is
    /// empty. The table decides how `cell` is interpreted.
    ops: Option<&'static TypeOps>,

    /// Storage for the contained value, inline or via heap pointer per the
    /// mode recorded in `ops`.
    cell: StorageCell,
}

impl AnyBox {
    /// Creates a container holding `value`.
    ///
    /// The `Clone` bound is what makes the container itself cloneable;
    /// attempting to store a non-cloneable type is rejected at compile time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::any::TypeId;
    ///
    /// use any_box::AnyBox;
    ///
    /// let value = AnyBox::new(2.5_f64);
    /// assert!(value.has_value());
    /// assert_eq!(value.type_id(), TypeId::of::<f64>());
    /// ```
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        let mut cell = StorageCell::new();

        if requires_heap::<T>() {
            cell.set_heap(Box::into_raw(Box::new(value)).cast());
        } else {
            // SAFETY: T fits the inline slot per requires_heap, and a fresh
            // cell holds no live value.
            unsafe {
                cell.inline_ptr_mut::<T>().write(value);
            }
        }

        Self {
            ops: Some(TypeOps::of::<T>()),
            cell,
        }
    }

    /// Creates an empty container.
    ///
    /// # Example
    ///
    /// ```rust
    /// use any_box::AnyBox;
    ///
    /// let value = AnyBox::empty();
    /// assert!(!value.has_value());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ops: None,
            cell: StorageCell::new(),
        }
    }

    /// Whether the container currently holds a value.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.ops.is_some()
    }

    /// Identity token of the contained type.
    ///
    /// An empty container reports the unit type identity, the "no type"
    /// token. Note that a container actually holding `()` reports the same
    /// token; the two cases are distinguished by
    /// [`has_value()`][Self::has_value].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::any::TypeId;
    ///
    /// use any_box::AnyBox;
    ///
    /// assert_eq!(AnyBox::empty().type_id(), TypeId::of::<()>());
    /// assert_eq!(AnyBox::new(1_u8).type_id(), TypeId::of::<u8>());
    /// ```
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.ops.map_or(TypeId::of::<()>(), |ops| (ops.type_id)())
    }

    /// Drops the contained value, if any, leaving the container empty.
    ///
    /// Idempotent: resetting an empty container does nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use any_box::AnyBox;
    ///
    /// let mut value = AnyBox::new("hello".to_string());
    /// value.reset();
    /// assert!(!value.has_value());
    ///
    /// value.reset();
    /// assert!(!value.has_value());
    /// ```
    pub fn reset(&mut self) {
        if let Some(ops) = self.ops.take() {
            // SAFETY: `ops` is the table selected when the cell was filled,
            // so it interprets the cell in the correct mode, and clearing
            // `self.ops` above guarantees no second finalization.
            unsafe {
                (ops.drop)(&mut self.cell);
            }
        }
    }

    /// Exchanges the contents of two containers.
    ///
    /// O(1) regardless of the contained types: only the table pointers and
    /// fixed-size cells change hands.
    ///
    /// # Example
    ///
    /// ```rust
    /// use any_box::{AnyBox, downcast_ref};
    ///
    /// let mut a = AnyBox::new(1_i32);
    /// let mut b = AnyBox::new("two".to_string());
    ///
    /// a.swap(&mut b);
    /// assert_eq!(downcast_ref::<String>(&a).map(String::as_str), Some("two"));
    /// assert_eq!(downcast_ref::<i32>(&b), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contained value into a new container, leaving this one
    /// empty.
    ///
    /// Taking from an empty container yields another empty container.
    ///
    /// # Example
    ///
    /// ```rust
    /// use any_box::{AnyBox, downcast_ref};
    ///
    /// let mut original = AnyBox::new(42_u64);
    /// let taken = original.take();
    ///
    /// assert!(!original.has_value());
    /// assert_eq!(downcast_ref::<u64>(&taken), Some(&42));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        self.ops.take().map_or_else(Self::empty, |ops| {
            let mut cell = StorageCell::new();

            // SAFETY: `ops` matches the filled cell; `self.ops` is already
            // cleared, so the vacated source cell is never finalized.
            unsafe {
                (ops.relocate)(&mut self.cell, &mut cell);
            }

            Self {
                ops: Some(ops),
                cell,
            }
        })
    }

    /// Replaces the contents with `value`, dropping any previous value.
    ///
    /// Implemented as construct-then-swap: the new value is staged in a
    /// temporary container first, so `self` is left untouched if staging
    /// panics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::any::TypeId;
    ///
    /// use any_box::AnyBox;
    ///
    /// let mut value = AnyBox::new(12_i32);
    /// value.set(vec![1, 2, 3]);
    /// assert_eq!(value.type_id(), TypeId::of::<Vec<i32>>());
    /// ```
    pub fn set<T: Clone + 'static>(&mut self, value: T) {
        let mut staged = Self::new(value);
        self.swap(&mut staged);
        // `staged` now holds the previous contents and drops them here.
    }

    /// Whether the contained value is of type `T`.
    ///
    /// Exact identity comparison; empty containers match no type.
    pub(crate) fn is_type<T: 'static>(&self) -> bool {
        self.ops
            .is_some_and(|ops| (ops.type_id)() == TypeId::of::<T>())
    }

    /// Typed pointer to the contained value.
    ///
    /// # Safety
    ///
    /// The caller must ensure the container holds a value of exactly type
    /// `T` (see [`is_type()`][Self::is_type]).
    pub(crate) unsafe fn value_ptr<T: 'static>(&self) -> *const T {
        debug_assert!(self.is_type::<T>());

        if requires_heap::<T>() {
            // SAFETY: The container holds a T, so its table is in heap mode
            // and the heap pointer is live.
            unsafe { self.cell.heap_ptr::<T>() }
        } else {
            self.cell.inline_ptr::<T>()
        }
    }

    /// Typed mutable pointer to the contained value.
    ///
    /// # Safety
    ///
    /// Same contract as [`value_ptr()`][Self::value_ptr].
    pub(crate) unsafe fn value_ptr_mut<T: 'static>(&mut self) -> *mut T {
        debug_assert!(self.is_type::<T>());

        if requires_heap::<T>() {
            // SAFETY: The container holds a T, so its table is in heap mode
            // and the heap pointer is live.
            unsafe { self.cell.heap_ptr::<T>() }
        } else {
            self.cell.inline_ptr_mut::<T>()
        }
    }
}

impl Clone for AnyBox {
    /// Deep-clones the contained value; cloning an empty container yields an
    /// empty container.
    fn clone(&self) -> Self {
        self.ops.map_or_else(Self::empty, |ops| {
            let mut cell = StorageCell::new();

            // SAFETY: `ops` matches the filled source cell and the fresh
            // destination cell holds no live value.
            unsafe {
                (ops.clone)(&self.cell, &mut cell);
            }

            Self {
                ops: Some(ops),
                cell,
            }
        })
    }
}

impl Default for AnyBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for AnyBox {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for AnyBox {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only, mutation is meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyBox")
            .field("has_value", &self.has_value())
            .field("type_id", &self.type_id())
            .finish_non_exhaustive()
    }
}
