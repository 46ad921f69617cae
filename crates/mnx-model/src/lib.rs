//! # mnx-model — MNX Document Model
//!
//! Typed, read-only, lazy views over one parsed MNX document. The model
//! borrows the `serde_json::Value` tree for the duration of a single
//! validation run; nothing is copied and nothing is mutated.
//!
//! ## Contract
//!
//! - Every entity collection is exposed as a [`Seq`]: a finite, restartable,
//!   ordered sequence whose iterator yields each element together with its
//!   structural array position. Diagnostics use the position to describe
//!   where duplicates and dangling references live, independently of any
//!   logical identifier the element may carry.
//! - Optional fields surface as `Option`, except where MNX defines an
//!   explicit default (staff number and staff count both default to 1);
//!   those accessors return the resolved value directly.
//! - Layout content is polymorphic over group and staff nodes;
//!   [`ContentNode::kind`] narrows a node to its concrete kind without
//!   losing type information.
//! - A required array field holding a non-array JSON value is a fatal
//!   [`StructureError`], never a silently empty sequence. An *absent*
//!   optional array yields an empty sequence.

pub mod error;

mod document;
mod layout;
mod score;
mod seq;

pub use document::{Document, Global, Measure, Part};
pub use error::StructureError;
pub use layout::{ContentKind, ContentNode, Group, Layout, Staff, StaffSource};
pub use score::{LayoutChange, MultimeasureRest, Page, Score, System};
pub use seq::{FromValue, Seq};
