//! Dense indices into a built street map.
//!
//! Coordinates are the graph's identity (see [`GeoCoord`](crate::GeoCoord)),
//! but once a map is built every distinct coordinate is interned to a
//! `NodeId` and every directed segment gets a `SegmentId`, so the router can
//! keep its working state in flat `Vec`s.

use std::fmt;

macro_rules! map_index {
    ($(#[$attr:meta])* $name:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "not reached" / "no predecessor".
            pub const INVALID: $name = $name(u32::MAX);

            /// Id of the `i`-th element of a map array.
            ///
            /// Maps never hold `u32::MAX` elements; larger `i` is a logic error.
            #[inline]
            pub fn from_index(i: usize) -> $name {
                debug_assert!(i < u32::MAX as usize, concat!($label, " index overflow"));
                $name(i as u32)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if *self == Self::INVALID {
                    write!(f, concat!($label, "#-"))
                } else {
                    write!(f, concat!($label, "#{}"), self.0)
                }
            }
        }
    };
}

map_index! {
    /// Distinct coordinate of a built street map.
    NodeId, "node"
}

map_index! {
    /// Directed street segment of a built street map.
    SegmentId, "segment"
}
