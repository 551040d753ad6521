//! Item domain model and its container collaborator.
//!
//! # Responsibility
//! - Define the item record shared by bookmark, history and search-engine
//!   collections.
//! - Keep item-to-container links non-owning.
//!
//! # Invariants
//! - Containers own items; items only point back weakly.
//! - Attribute writes notify synchronously before the setter returns.

pub mod array;
pub mod item;
pub mod property;
