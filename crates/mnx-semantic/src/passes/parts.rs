//! Parts pass: part-id uniqueness and per-part measure counts.

use mnx_model::{Document, StructureError};

use crate::registry::ValidationState;
use crate::report::Emitter;

/// Register part ids and compare each part's declared measure count
/// against the global count established by the global pass.
pub(crate) fn run(
    doc: &Document<'_>,
    state: &mut ValidationState,
    diag: &mut Emitter<'_>,
) -> Result<(), StructureError> {
    let mut valid = true;
    for (position, part) in doc.parts()?.iter() {
        // Parts without an id are described by their array position.
        let label = match part.id() {
            Some(id) => {
                if let Err(first) = state.parts.insert(id.to_string(), position) {
                    diag.error(&format!(
                        "more than one part with id \"{id}\" at locations {first} and {position}."
                    ));
                    valid = false;
                }
                format!(" \"{id}\"")
            }
            None => format!("[{position}]"),
        };
        let declared = part.measure_count()?;
        if declared != state.measure_count {
            diag.error(&format!(
                "Part{label} contains a different number of measures ({declared}) \
                 than are defined globally ({}).",
                state.measure_count
            ));
            valid = false;
        }
    }
    if valid {
        diag.info("validated all parts.");
    }
    Ok(())
}
