//! Fatal structural errors raised by the document model.
//!
//! A semantic pass tolerates missing optional nodes and dangling references,
//! but a required array field holding a non-array value means the traversal
//! itself cannot proceed. That condition aborts validation of the current
//! document only; the caller reports it and moves on to the next input.

use thiserror::Error;

/// Structural malformation that aborts validation of the current document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A node that must be an array holds some other JSON type.
    #[error("\"{node}\" node in the document is not an array")]
    NotAnArray {
        /// JSON key of the offending node.
        node: &'static str,
    },
}
