use std::any::TypeId;
use std::marker::PhantomData;

use crate::storage::{StorageCell, requires_heap};

/// The per-type operation table: remembers how to identify, relocate, clone
/// and drop a contained value while forgetting its type.
///
/// One immutable instance exists per distinct contained type, shared by every
/// container holding that type. The table also fixes, per type, whether the
/// associated [`StorageCell`] is interpreted in inline or heap mode; all four
/// operations of a table agree on that mode.
pub(crate) struct TypeOps {
    /// Identity token of the stored type.
    pub(crate) type_id: fn() -> TypeId,

    /// Moves the value from the source cell to the destination cell.
    ///
    /// Afterwards the source cell is vacated: the caller must clear the
    /// source container's table pointer so that [`drop`][Self::drop] never
    /// runs on the vacated cell. In heap mode the source pointer is nulled
    /// as well, so an accidental second finalization cannot double-free.
    pub(crate) relocate: unsafe fn(src: &mut StorageCell, dst: &mut StorageCell),

    /// Deep-clones the value from the source cell into the destination cell.
    ///
    /// Cloneability is guaranteed by the `T: Clone` bound on the container
    /// constructor, so this never fails at call time (though `T::clone`
    /// itself may panic, in which case nothing is written to the destination).
    pub(crate) clone: unsafe fn(src: &StorageCell, dst: &mut StorageCell),

    /// Runs the value's destructor and releases any heap memory.
    ///
    /// The only path that finalizes a contained value. The table-clearing
    /// protocol after [`relocate`][Self::relocate] ensures it runs at most
    /// once per live value.
    pub(crate) drop: unsafe fn(cell: &mut StorageCell),
}

impl TypeOps {
    /// Returns the operation table for `T`, selecting inline or heap mode.
    ///
    /// The table is a promoted constant: repeated calls for the same `T` are
    /// free and containers compare types via the identity token, never via
    /// table addresses.
    pub(crate) fn of<T: Clone + 'static>() -> &'static Self {
        struct PerType<T>(PhantomData<T>);

        impl<T: Clone + 'static> PerType<T> {
            const TABLE: TypeOps = if requires_heap::<T>() {
                TypeOps {
                    type_id: TypeId::of::<T>,
                    relocate: heap::relocate,
                    clone: heap::clone::<T>,
                    drop: heap::drop::<T>,
                }
            } else {
                TypeOps {
                    type_id: TypeId::of::<T>,
                    relocate: inline::relocate::<T>,
                    clone: inline::clone::<T>,
                    drop: inline::drop::<T>,
                }
            };
        }

        &PerType::<T>::TABLE
    }
}

/// Operations for types stored directly in the cell's inline slot.
mod inline {
    use std::ptr;

    use crate::storage::StorageCell;

    /// # Safety
    ///
    /// `src` must hold an initialized `T` in its inline slot; `dst` must hold
    /// no live value. Afterwards `src` must be treated as vacated.
    pub(super) unsafe fn relocate<T>(src: &mut StorageCell, dst: &mut StorageCell) {
        // SAFETY: `src` holds an initialized T; reading it out relocates the
        // value, leaving the source bytes as plain uninitialized memory.
        let value = unsafe { src.inline_ptr::<T>().read() };

        // SAFETY: The slot fits T (same mode) and holds no live value.
        unsafe {
            dst.inline_ptr_mut::<T>().write(value);
        }
    }

    /// # Safety
    ///
    /// `src` must hold an initialized `T` in its inline slot; `dst` must hold
    /// no live value.
    pub(super) unsafe fn clone<T: Clone>(src: &StorageCell, dst: &mut StorageCell) {
        // SAFETY: `src` holds an initialized T for the duration of the call.
        let value = unsafe { &*src.inline_ptr::<T>() };

        // SAFETY: The slot fits T (same mode) and holds no live value.
        unsafe {
            dst.inline_ptr_mut::<T>().write(value.clone());
        }
    }

    /// # Safety
    ///
    /// `cell` must hold an initialized `T` in its inline slot, not yet
    /// finalized.
    pub(super) unsafe fn drop<T>(cell: &mut StorageCell) {
        // SAFETY: `cell` holds an initialized T and is not read again by the
        // caller without reinitialization.
        unsafe {
            ptr::drop_in_place(cell.inline_ptr_mut::<T>());
        }
    }
}

/// Operations for types stored behind the cell's heap pointer.
///
/// Relocation is a plain pointer handoff, so it needs no type parameter.
mod heap {
    use std::ptr;

    use crate::storage::StorageCell;

    /// # Safety
    ///
    /// `src` must hold a live heap pointer; `dst` must hold no live value.
    /// Afterwards `src` must be treated as vacated.
    pub(super) unsafe fn relocate(src: &mut StorageCell, dst: &mut StorageCell) {
        // SAFETY: The owning table is in heap mode, so the pointer is live.
        let ptr = unsafe { src.heap_ptr::<()>() };

        dst.set_heap(ptr);
        src.set_heap(ptr::null_mut());
    }

    /// # Safety
    ///
    /// `src` must hold a live heap pointer to a `T`; `dst` must hold no live
    /// value.
    pub(super) unsafe fn clone<T: Clone>(src: &StorageCell, dst: &mut StorageCell) {
        // SAFETY: The owning table is in heap mode, so the pointer is live
        // and points to an initialized T.
        let value = unsafe { &*src.heap_ptr::<T>() };

        dst.set_heap(Box::into_raw(Box::new(value.clone())).cast());
    }

    /// # Safety
    ///
    /// `cell` must hold a live heap pointer to a `T`, not yet finalized.
    pub(super) unsafe fn drop<T>(cell: &mut StorageCell) {
        // SAFETY: The owning table is in heap mode, so the pointer is live.
        let ptr = unsafe { cell.heap_ptr::<T>() };

        // SAFETY: The pointer was produced by Box::into_raw during storage
        // and ownership has not been transferred elsewhere.
        let boxed = unsafe { Box::from_raw(ptr) };
        std::mem::drop(boxed);

        cell.set_heap(ptr::null_mut());
    }
}
