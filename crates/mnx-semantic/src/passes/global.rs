//! Global pass: measure numbering and the measure registry.

use mnx_model::{Document, StructureError};

use crate::registry::ValidationState;
use crate::report::Emitter;

/// Walk the global measure sequence, computing each measure's logical id
/// and registering it for the later passes.
///
/// The logical id is the explicit `index` field when present, otherwise
/// the previous logical id plus one; the running id starts at 0 so the
/// first implicit id is 1.
pub(crate) fn run(
    doc: &Document<'_>,
    state: &mut ValidationState,
    diag: &mut Emitter<'_>,
) -> Result<(), StructureError> {
    let mut valid = true;
    if let Some(global) = doc.global() {
        let mut measure_id: i64 = 0;
        for (position, measure) in global.measures()?.iter() {
            state.measure_count += 1;
            measure_id = match measure.index() {
                Some(index) => index,
                None => measure_id + 1,
            };
            if let Err(first) = state.measures.insert(measure_id, position) {
                diag.error(&format!(
                    "measure index {measure_id} is duplicated at location {first} and {position}."
                ));
                valid = false;
            }
        }
    }
    if valid {
        diag.info("validated global data.");
    }
    Ok(())
}
