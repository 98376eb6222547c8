//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the inner type's `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The identifier that follows `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// Identifier handed out by the coordinator on registration.
    ///
    /// Ids are sequential and start at [`RobotId::FIRST`]; `0` is never
    /// assigned so it can never collide with an "unreserved" marker.
    pub struct RobotId(u32);
}

typed_id! {
    /// Monotonic sequence number of a request processed by the coordinator.
    pub struct RequestSeq(u64);
}

impl RobotId {
    /// First id the coordinator assigns.
    pub const FIRST: RobotId = RobotId(1);
}

impl RequestSeq {
    pub const ZERO: RequestSeq = RequestSeq(0);
}
