//! Registry indices for patients and units.
//!
//! Both registries are plain `Vec`s filled once at world construction, so an
//! id is simply a position in its registry.

use std::fmt;

macro_rules! registry_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// The id of the `index`-th registry entry.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

registry_id! {
    /// Position of a patient in the environment's patient list.
    PatientId
}

registry_id! {
    /// Position of a unit in the world's roster (registration order).
    UnitId
}
