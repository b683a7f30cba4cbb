use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub(crate) fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[must_use]
            pub fn idx(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index of a [`crate::SourceFile`] within its changeset.
    SourceFileId
);
define_id!(
    /// Index of a [`crate::Definition`] within its changeset.
    DefinitionId
);
define_id!(
    /// Index of a [`crate::Use`] within its changeset.
    UseId
);
define_id!(
    /// Index of a [`crate::DiffRegion`] within its changeset.
    DiffRegionId
);
