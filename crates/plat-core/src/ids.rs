//! Typed index wrappers for cohort nodes and actuator channels.
//!
//! Both are plain positions in a `Vec` (cohort arena, actuator declaration
//! order).  The inner integer is `pub`; `.index()` is the conversion meant
//! for slicing.

use std::fmt;

/// Generate an index newtype that prints as `<label>#<n>`.
macro_rules! index_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
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
                    write!(f, concat!($label, "#{}"), self.0)
                } else {
                    f.write_str(concat!($label, "#invalid"))
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

index_id! {
    /// Position of a platform node in a cohort, assigned in insertion order.
    pub struct PlatformId(u32) => "platform";
}

index_id! {
    /// Position of an actuator within its `ActuatorSet` (declaration order).
    /// `u16` is plenty: platforms carry a handful of control channels.
    pub struct ActuatorId(u16) => "actuator";
}
