//! Explicitly-set property tracking for animation sets

use std::fmt;
use std::ops::BitOr;

/// Which timing properties were set directly on an [`AnimationSet`]
/// rather than left to its members.
///
/// Bit values are stable and match persisted set descriptions.
///
/// [`AnimationSet`]: crate::set::AnimationSet
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PropertyFlags(u32);

impl PropertyFlags {
    pub const FILL_AFTER: PropertyFlags = PropertyFlags(0x1);
    pub const FILL_BEFORE: PropertyFlags = PropertyFlags(0x2);
    pub const REPEAT_MODE: PropertyFlags = PropertyFlags(0x4);
    pub const SHARE_INTERPOLATOR: PropertyFlags = PropertyFlags(0x10);
    pub const DURATION: PropertyFlags = PropertyFlags(0x20);
    /// Derived: some member changes the transformation matrix
    pub const MORPH_MATRIX: PropertyFlags = PropertyFlags(0x40);
    /// Derived: some member changes bounds
    pub const CHANGE_BOUNDS: PropertyFlags = PropertyFlags(0x80);

    const ALL: u32 = 0x1 | 0x2 | 0x4 | 0x10 | 0x20 | 0x40 | 0x80;

    pub const fn empty() -> Self {
        PropertyFlags(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones
    pub const fn from_bits_truncate(bits: u32) -> Self {
        PropertyFlags(bits & Self::ALL)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: PropertyFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: PropertyFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: PropertyFlags) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: PropertyFlags, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    pub const fn fill_after(self) -> bool {
        self.contains(Self::FILL_AFTER)
    }

    pub const fn fill_before(self) -> bool {
        self.contains(Self::FILL_BEFORE)
    }

    pub const fn repeat_mode(self) -> bool {
        self.contains(Self::REPEAT_MODE)
    }

    pub const fn share_interpolator(self) -> bool {
        self.contains(Self::SHARE_INTERPOLATOR)
    }

    pub const fn duration(self) -> bool {
        self.contains(Self::DURATION)
    }

    pub const fn morph_matrix(self) -> bool {
        self.contains(Self::MORPH_MATRIX)
    }

    pub const fn change_bounds(self) -> bool {
        self.contains(Self::CHANGE_BOUNDS)
    }
}

impl BitOr for PropertyFlags {
    type Output = PropertyFlags;

    fn bitor(self, rhs: PropertyFlags) -> PropertyFlags {
        PropertyFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for PropertyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PropertyFlags, &str); 7] = [
            (PropertyFlags::FILL_AFTER, "FILL_AFTER"),
            (PropertyFlags::FILL_BEFORE, "FILL_BEFORE"),
            (PropertyFlags::REPEAT_MODE, "REPEAT_MODE"),
            (PropertyFlags::SHARE_INTERPOLATOR, "SHARE_INTERPOLATOR"),
            (PropertyFlags::DURATION, "DURATION"),
            (PropertyFlags::MORPH_MATRIX, "MORPH_MATRIX"),
            (PropertyFlags::CHANGE_BOUNDS, "CHANGE_BOUNDS"),
        ];

        write!(f, "PropertyFlags(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}
