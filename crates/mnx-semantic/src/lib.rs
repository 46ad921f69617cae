//! # mnx-semantic — Semantic Validation Pipeline
//!
//! Validates the cross-references and consistency constraints a JSON
//! Schema cannot express: identifier uniqueness, referential integrity
//! between parts, layouts, measures, and scores, ordering invariants over
//! system sequences, and multimeasure-rest span bounds.
//!
//! ## Pipeline
//!
//! Four passes run in a fixed order over one [`Document`], threading a
//! [`ValidationState`] that makes the order-dependency explicit:
//!
//! 1. **Global** — computes logical measure ids and builds the measure
//!    registry.
//! 2. **Parts** — builds the part registry and checks measure counts
//!    against the global count.
//! 3. **Layouts** — builds the layout registry and walks each layout's
//!    content tree, resolving staff sources through the part registry.
//! 4. **Scores** — resolves layout and measure references and enforces the
//!    system-ordering invariant.
//!
//! The pipeline does not stop at the first violation: every non-fatal
//! finding is delivered to the caller's [`DiagnosticSink`] and validation
//! continues to maximize diagnostic yield. Only a structurally malformed
//! node (a required array holding a non-array value) aborts the run, by
//! returning [`StructureError`] to the caller.

mod passes;
pub mod registry;
pub mod report;

pub use registry::{Registry, ValidationState};
pub use report::{Diagnostic, DiagnosticSink, MemorySink, Severity};

use mnx_model::{Document, StructureError};

use crate::report::Emitter;

/// Run the four semantic passes over one document.
///
/// Registries are built fresh for this call, so repeated validation of the
/// same document yields identical diagnostics in identical order. Returns
/// `Ok(true)` when no error-severity diagnostic was emitted; warnings do
/// not flip the result. A fatal structural error aborts the remaining
/// passes for this document only.
pub fn validate(doc: &Document<'_>, sink: &dyn DiagnosticSink) -> Result<bool, StructureError> {
    let mut state = ValidationState::default();
    let mut diag = Emitter::new(sink);
    passes::global::run(doc, &mut state, &mut diag)?;
    passes::parts::run(doc, &mut state, &mut diag)?;
    passes::layouts::run(doc, &mut state, &mut diag)?;
    passes::scores::run(doc, &state, &mut diag)?;
    Ok(diag.error_count() == 0)
}
