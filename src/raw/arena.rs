use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use super::handle::Handle;

/// Generation source shared by every arena, so no two allocations carry the same stamp
/// whichever tree made them.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// A slot plus the generation stamped on it by the allocation that filled it.
#[derive(Clone)]
struct Slot<T> {
    generation: u64,
    element: Option<T>,
}

/// Slot storage for tree nodes.
///
/// Freed slots are recycled, but every allocation receives a fresh generation from a
/// crate-wide counter. A `(Handle, generation)` pair therefore identifies one allocation
/// across all arenas: ids of removed nodes and ids from another tree both fail to resolve.
/// A clone copies the stamps, so ids taken before the clone resolve in both copies.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

        if let Some(handle) = self.free.pop() {
            let slot = &mut self.slots[handle.to_index()];
            slot.generation = generation;
            slot.element = Some(element);
            handle
        } else {
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot {
                generation,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Returns the generation of the live element at `handle`, or `None` if the slot is
    /// vacant or out of range.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Option<u64> {
        self.slots.get(handle.to_index()).and_then(|slot| slot.element.as_ref().map(|_| slot.generation))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element =
            self.slots[handle.to_index()].element.take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Mutable access to every slot in storage order; vacant slots yield `None`.
    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = Option<&mut T>> {
        self.slots.iter_mut().map(|slot| slot.element.as_mut())
    }

    /// Drops every element. Stamps handed out before stay retired.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
