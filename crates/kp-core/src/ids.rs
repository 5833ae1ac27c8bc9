//! Typed indices.
//!
//! Stations, lines, and ants are all dense indices into per-run `Vec`s.
//! Wrapping them keeps a `StationId` from being used where a `LineId` is
//! expected.  `Display` prints a short tag (`station 7`), which is what the
//! log lines and error messages show.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "not assigned yet".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, " {}"), self.0)
                } else {
                    f.write_str(concat!($tag, " <invalid>"))
                }
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of an ant in its colony; also the ant's RNG stream.
    pub struct AgentId(u32) => "ant";
}

typed_id! {
    /// Station index, assigned in the order the network builder first sees
    /// each label.
    pub struct StationId(u32) => "station";
}

typed_id! {
    /// Line index in configuration order.
    pub struct LineId(u16) => "line";
}
