use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

/// Raw inline storage sized and aligned to hold two pointers.
pub(crate) type InlineSlot = MaybeUninit<[*const (); 2]>;

/// Whether values of type `T` must live on the heap instead of inline in a
/// [`StorageCell`].
///
/// True iff `T` is too large or too strictly aligned for the inline slot.
/// Total and deterministic: the same `T` always maps to the same mode.
///
/// Rust relocates values by untyped byte copy and that can never unwind, so
/// every type satisfies the "safe to relocate" requirement and only layout
/// participates in the decision.
pub(crate) const fn requires_heap<T>() -> bool {
    size_of::<T>() > size_of::<InlineSlot>() || align_of::<T>() > align_of::<InlineSlot>()
}

/// A fixed-size memory cell that stores either a value inline or a pointer to
/// a heap allocation holding the value.
///
/// Which member is live is a property of the [`TypeOps`][crate::ops::TypeOps]
/// table of the container that owns the cell, never of the cell itself. The
/// cell must not be interpreted without consulting that table's mode.
#[repr(C)]
pub(crate) union StorageCell {
    /// Owning pointer to a heap-allocated value, type-erased.
    heap: *mut (),

    /// In-place storage for values small enough to avoid an allocation.
    inline: InlineSlot,
}

impl StorageCell {
    /// Creates a cell with no live value in either member.
    pub(crate) const fn new() -> Self {
        Self {
            heap: ptr::null_mut(),
        }
    }

    /// Pointer to the value location used in inline mode.
    ///
    /// Merely forms the pointer; whether anything valid lives there is up to
    /// the owning table.
    pub(crate) const fn inline_ptr<T>(&self) -> *const T {
        (&raw const self.inline).cast()
    }

    /// Mutable pointer to the value location used in inline mode.
    pub(crate) const fn inline_ptr_mut<T>(&mut self) -> *mut T {
        (&raw mut self.inline).cast()
    }

    /// Reads the heap pointer as a typed pointer to the stored value.
    ///
    /// # Safety
    ///
    /// The caller must ensure the owning table is in heap mode and a pointer
    /// was previously stored with [`set_heap()`][Self::set_heap].
    pub(crate) const unsafe fn heap_ptr<T>(&self) -> *mut T {
        // SAFETY: Forwarded to the caller; in heap mode the `heap` member is
        // the initialized one.
        unsafe { self.heap }.cast()
    }

    /// Stores a heap pointer, making the `heap` member the live one.
    pub(crate) const fn set_heap(&mut self, ptr: *mut ()) {
        self.heap = ptr;
    }
}

impl fmt::Debug for StorageCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The cell does not know its own interpretation, so there is nothing
        // meaningful to show.
        f.debug_struct("StorageCell").finish_non_exhaustive()
    }
}
