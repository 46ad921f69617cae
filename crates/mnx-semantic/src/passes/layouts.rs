//! Layouts pass: layout-id uniqueness and the recursive content walk.

use mnx_model::{ContentKind, ContentNode, Document, Seq, StructureError};

use crate::registry::ValidationState;
use crate::report::Emitter;

/// Register layout ids and validate every staff source reachable through
/// each layout's content tree against the part registry.
pub(crate) fn run(
    doc: &Document<'_>,
    state: &mut ValidationState,
    diag: &mut Emitter<'_>,
) -> Result<(), StructureError> {
    let mut valid = true;
    for (position, layout) in doc.layouts()?.iter() {
        if let Some(id) = layout.id() {
            if let Err(first) = state.layouts.insert(id.to_string(), position) {
                diag.error(&format!(
                    "more than one layout with id \"{id}\" at locations {first} and {position}."
                ));
                valid = false;
            }
        }
        let owner = match layout.id() {
            Some(id) => format!("Layout \"{id}\""),
            None => format!("Layout[{position}]"),
        };
        valid &= walk_content(layout.content()?, &owner, doc, state, diag)?;
    }
    if valid {
        diag.info("validated all layouts.");
    }
    Ok(())
}

/// Walk one content sequence, recursing into groups and checking staff
/// sources. Content forms a tree, so the recursion needs no cycle guard.
/// Returns whether the subtree was free of violations.
fn walk_content(
    content: Seq<'_, ContentNode<'_>>,
    owner: &str,
    doc: &Document<'_>,
    state: &ValidationState,
    diag: &mut Emitter<'_>,
) -> Result<bool, StructureError> {
    let mut valid = true;
    for (_, node) in content.iter() {
        match node.kind() {
            Some(ContentKind::Group(group)) => {
                valid &= walk_content(group.content()?, owner, doc, state, diag)?;
            }
            Some(ContentKind::Staff(staff)) => {
                for (_, source) in staff.sources()?.iter() {
                    let Some(part_id) = source.part() else {
                        continue;
                    };
                    match state.parts.position(part_id) {
                        Some(part_position) => {
                            let staff_number = source.staff();
                            let staves = doc
                                .part(part_position)
                                .map_or(1, |part| part.staves());
                            if staff_number < 1 || staff_number > staves {
                                diag.error(&format!(
                                    "{owner} has invalid staff number ({staff_number}) \
                                     for part \"{part_id}\"."
                                ));
                                valid = false;
                            }
                        }
                        None => {
                            diag.error(&format!(
                                "{owner} references non-existent part \"{part_id}\"."
                            ));
                            valid = false;
                        }
                    }
                }
            }
            None => {}
        }
    }
    Ok(valid)
}
