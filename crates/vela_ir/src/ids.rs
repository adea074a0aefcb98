//! Typed `u32` keys for IR arenas.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw slot index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// The raw slot index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A signal inside one [`Entity`](crate::Entity).
    SignalId
);

define_id!(
    /// An entity stored in an elaboration session.
    EntityId
);
