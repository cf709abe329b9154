use std::fmt;

use crate::id::GenerationalId;
use crate::profiling::profile_function;

/// Reasons a [`GenerationalId`] is rejected by a [`SlotTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// The id is the invalid sentinel.
    InvalidId,
    /// The index was never allocated by this table.
    OutOfRange {
        index: u32,
        capacity: usize,
    },
    /// The slot has been removed and not reused yet.
    Vacant {
        index: u32,
    },
    /// The slot has been reused; the id belongs to an earlier occupant.
    StaleGeneration {
        index: u32,
        expected: u32,
        found: u32,
    },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::InvalidId => write!(f, "invalid id"),
            SlotError::OutOfRange { index, capacity } => {
                write!(f, "slot {} out of range (capacity {})", index, capacity)
            }
            SlotError::Vacant { index } => write!(f, "slot {} is vacant, use after free", index),
            SlotError::StaleGeneration {
                index,
                expected,
                found,
            } => write!(
                f,
                "invalid generation for slot {}: id has {}, slot is at {}",
                index, found, expected
            ),
        }
    }
}

impl std::error::Error for SlotError {}

struct Slot<T> {
    /// Generation of the last id issued for this index.
    generation: u32,
    value: Option<T>,
}

/// Growable slot storage addressed by [`GenerationalId`].
///
/// Freed indices are recycled through a free list. Every reuse issues an id
/// with a bumped generation, so ids handed out for an earlier occupant are
/// rejected instead of aliasing the new one.
pub struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for SlotTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store `value` and return the id addressing it.
    pub fn add(&mut self, value: T) -> GenerationalId {
        profile_function!();
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.value.is_none(), "free list holds an occupied slot");
            let id = GenerationalId::new(index, slot.generation).with_bumped_generation();
            slot.generation = id.generation();
            slot.value = Some(value);
            id
        } else {
            let index = u32::try_from(self.slots.len()).expect("slot table index space exhausted");
            let id = GenerationalId::new(index, 0);
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            id
        }
    }

    fn check(&self, id: GenerationalId) -> Result<usize, SlotError> {
        if !id.is_valid() {
            return Err(SlotError::InvalidId);
        }
        let index = id.index();
        let slot = self
            .slots
            .get(index as usize)
            .ok_or(SlotError::OutOfRange {
                index,
                capacity: self.slots.len(),
            })?;
        if slot.generation != id.generation() {
            return Err(SlotError::StaleGeneration {
                index,
                expected: slot.generation,
                found: id.generation(),
            });
        }
        if slot.value.is_none() {
            return Err(SlotError::Vacant { index });
        }
        Ok(index as usize)
    }

    /// Release the slot addressed by `id` and hand back its value.
    ///
    /// Storage is never shrunk; the index goes onto the free list.
    pub fn remove(&mut self, id: GenerationalId) -> Result<T, SlotError> {
        profile_function!();
        let index = self.check(id)?;
        let value = self.slots[index]
            .value
            .take()
            .ok_or(SlotError::Vacant { index: index as u32 })?;
        self.free.push(index as u32);
        Ok(value)
    }

    pub fn get(&self, id: GenerationalId) -> Result<&T, SlotError> {
        profile_function!();
        let index = self.check(id)?;
        self.slots[index]
            .value
            .as_ref()
            .ok_or(SlotError::Vacant { index: index as u32 })
    }

    pub fn get_mut(&mut self, id: GenerationalId) -> Result<&mut T, SlotError> {
        profile_function!();
        let index = self.check(id)?;
        self.slots[index]
            .value
            .as_mut()
            .ok_or(SlotError::Vacant { index: index as u32 })
    }

    pub fn contains(&self, id: GenerationalId) -> bool {
        self.check(id).is_ok()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Free every live slot. Generations are kept, so outstanding ids go stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                self.free.push(index as u32);
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter().enumerate(),
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GenerationalId, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (GenerationalId::new(index as u32, generation), value))
        })
    }

    /// Ids of every live entry, in index order.
    pub fn ids(&self) -> impl Iterator<Item = GenerationalId> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

pub struct Iter<'a, T> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (GenerationalId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.inner.by_ref() {
            if let Some(value) = slot.value.as_ref() {
                return Some((GenerationalId::new(index as u32, slot.generation), value));
            }
        }
        None
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
