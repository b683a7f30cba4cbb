//! Entity bookkeeping for changeset analysis: source files, definitions,
//! uses, comments, diff regions, relations, and partitions.
//!
//! Entities live in arenas owned by a [`Changeset`] and refer to each other
//! through dense integer ids, so back-references (definition ↔ region,
//! file ↔ entity) never form ownership cycles.

mod changeset;
mod entities;
mod error;
mod ids;
mod partition;
mod region;
mod relation;
mod source_file;

pub use changeset::*;
pub use entities::*;
pub use error::*;
pub use ids::*;
pub use partition::*;
pub use region::*;
pub use relation::*;
pub use source_file::*;
