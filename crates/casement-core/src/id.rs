//! Packed generational identifiers.
//!
//! A [`GenerationalId`] is a single `u64` carrying a slot index in the low
//! [`INDEX_BITS`] bits and a generation counter in the high
//! [`GENERATION_BITS`] bits. The all-ones pattern is reserved as the invalid
//! sentinel, which is why neither field may ever hold its own all-ones value.

use std::fmt;

/// Number of bits used for the slot index.
pub const INDEX_BITS: u32 = 32;
/// Number of bits used for the generation counter.
pub const GENERATION_BITS: u32 = u64::BITS - INDEX_BITS;

/// Mask selecting the index field. An index equal to this value is reserved.
pub const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;
/// Mask selecting the generation field once shifted down.
pub const GENERATION_MASK: u64 = (1 << GENERATION_BITS) - 1;

/// Largest generation that may be handed out. The all-ones generation is only
/// ever carried by the invalid sentinel.
pub const MAX_GENERATION: u32 = (GENERATION_MASK - 1) as u32;

/// An identifier combining a slot index and the generation it was issued at.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationalId(u64);

static_assertions::assert_eq_size!(GenerationalId, u64);
static_assertions::const_assert!(INDEX_BITS + GENERATION_BITS == u64::BITS);

impl GenerationalId {
    /// The invalid sentinel. Decodes to neither a valid index nor generation.
    pub const INVALID: Self = Self(u64::MAX);

    /// Build an identifier from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the reserved index mask or `generation` is past
    /// [`MAX_GENERATION`].
    pub fn new(index: u32, generation: u32) -> Self {
        assert!(
            u64::from(index) != INDEX_MASK,
            "index {index:#x} is reserved for the invalid id"
        );
        assert!(
            generation <= MAX_GENERATION,
            "generation {generation} exceeds the maximum of {MAX_GENERATION}"
        );
        Self((u64::from(generation) << INDEX_BITS) | u64::from(index))
    }

    /// Reinterpret an encoded identifier, e.g. one read back from native
    /// user data. Never panics; the result may be invalid.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The encoded form of this identifier.
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// `false` for the sentinel and for any bit pattern whose index field
    /// holds the reserved mask.
    pub const fn is_valid(self) -> bool {
        self.0 & INDEX_MASK != INDEX_MASK
    }

    /// The slot index.
    ///
    /// # Panics
    ///
    /// Panics when called on an id whose index field holds the reserved mask,
    /// which includes [`GenerationalId::INVALID`].
    pub fn index(self) -> u32 {
        let index = self.0 & INDEX_MASK;
        assert!(index != INDEX_MASK, "index of an invalid id");
        index as u32
    }

    pub const fn generation(self) -> u32 {
        ((self.0 >> INDEX_BITS) & GENERATION_MASK) as u32
    }

    /// Same index, generation incremented by one.
    ///
    /// # Panics
    ///
    /// Panics once the generation would pass [`MAX_GENERATION`]; wrapping
    /// around would let a stale id alias a live one.
    pub fn with_bumped_generation(self) -> Self {
        let generation = self.generation();
        assert!(
            generation < MAX_GENERATION,
            "generation overflow for slot {}",
            self.index()
        );
        Self::new(self.index(), generation + 1)
    }
}

impl Default for GenerationalId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for GenerationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.debug_struct("GenerationalId")
                .field("index", &(self.0 & INDEX_MASK))
                .field("generation", &self.generation())
                .finish()
        } else {
            f.write_str("GenerationalId(INVALID)")
        }
    }
}

impl fmt::Display for GenerationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}v{}", self.0 & INDEX_MASK, self.generation())
        } else {
            f.write_str("invalid")
        }
    }
}
