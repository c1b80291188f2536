//! Shared foundational types used across the Edgeport port placer.
//!
//! This crate provides interned identifiers for block and port names, an
//! append-only arena for search-tree storage, and the common internal
//! error type.

#![warn(missing_docs)]

pub mod arena;
pub mod ident;
pub mod result;

pub use arena::{Arena, ArenaId};
pub use ident::{Ident, Interner};
pub use result::{EdgeportResult, InternalError};
