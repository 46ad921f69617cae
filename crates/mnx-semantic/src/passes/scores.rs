//! Scores pass: layout/measure resolution, multimeasure-rest spans, and
//! the system-ordering invariant.

use mnx_model::{Document, StructureError};

use crate::registry::ValidationState;
use crate::report::Emitter;

/// Validate every score against the registries built by the earlier
/// passes.
///
/// Within one score, systems are totally ordered by measure position
/// across all pages: the first system should start at the piece's first
/// measure (a warning when it does not), and each subsequent system must
/// start strictly after the previous one.
pub(crate) fn run(
    doc: &Document<'_>,
    state: &ValidationState,
    diag: &mut Emitter<'_>,
) -> Result<(), StructureError> {
    let mut valid = true;
    for (score_position, score) in doc.scores()?.iter() {
        // Scores without a name are described by their array position.
        let score_name = match score.name() {
            Some(name) => format!("\"{name}\""),
            None => format!("[{score_position}]"),
        };

        if let Some(layout_id) = score.layout() {
            if state.layouts.position(layout_id).is_none() {
                diag.error(&format!(
                    "Score {score_name} references non-existent layout \"{layout_id}\"."
                ));
                valid = false;
            }
        }

        for (_, rest) in score.multimeasure_rests()?.iter() {
            valid &= check_multimeasure_rest(&rest, &score_name, state, diag);
        }

        // Last accepted system's resolved measure position, carried across
        // page boundaries within this score.
        let mut previous_system: Option<usize> = None;

        for (page_position, page) in score.pages()?.iter() {
            if let Some(layout_id) = page.layout() {
                if state.layouts.position(layout_id).is_none() {
                    diag.error(&format!(
                        "Page[{page_position}] in score {score_name} \
                         references non-existent layout \"{layout_id}\"."
                    ));
                    valid = false;
                }
            }

            for (system_position, system) in page.systems()?.iter() {
                let site = format!(
                    "System[{system_position}] in page[{page_position}] in score {score_name}"
                );

                if let Some(layout_id) = system.layout() {
                    if state.layouts.position(layout_id).is_none() {
                        diag.error(&format!(
                            "{site} references non-existent layout \"{layout_id}\"."
                        ));
                        valid = false;
                    }
                }

                match system.measure() {
                    None => {
                        diag.error(&format!("{site} is missing its measure reference."));
                        valid = false;
                    }
                    Some(measure_id) => match state.measures.position(&measure_id) {
                        None => {
                            diag.error(&format!(
                                "{site} references non-existent measure {measure_id}."
                            ));
                            valid = false;
                        }
                        Some(measure_position) => {
                            match previous_system {
                                None => {
                                    if measure_position != 0 {
                                        diag.warning(&format!(
                                            "The first system in score {score_name} \
                                             does not start at the first measure."
                                        ));
                                    }
                                }
                                Some(previous) if measure_position <= previous => {
                                    diag.error(&format!(
                                        "{site} starts at or before the previous system."
                                    ));
                                    valid = false;
                                }
                                Some(_) => {}
                            }
                            previous_system = Some(measure_position);
                        }
                    },
                }

                for (change_position, change) in system.layout_changes()?.iter() {
                    let change_site = format!(
                        "Layout change[{change_position}] in system[{system_position}] \
                         in page[{page_position}] in score {score_name}"
                    );
                    match change.layout() {
                        Some(layout_id) => {
                            if state.layouts.position(layout_id).is_none() {
                                diag.error(&format!(
                                    "{change_site} references non-existent layout \
                                     \"{layout_id}\"."
                                ));
                                valid = false;
                            }
                        }
                        None => {
                            diag.error(&format!(
                                "{change_site} is missing its layout reference."
                            ));
                            valid = false;
                        }
                    }
                    if let Some(measure_id) = change.location_measure() {
                        if state.measures.position(&measure_id).is_none() {
                            diag.error(&format!(
                                "{change_site} references non-existent measure {measure_id}."
                            ));
                            valid = false;
                        }
                    }
                }
            }
        }
    }
    if valid {
        diag.info("validated all scores.");
    }
    Ok(())
}

/// Resolve a rest's start measure and check that the whole span lies
/// within existing measures. Returns whether the rest was valid.
fn check_multimeasure_rest(
    rest: &mnx_model::MultimeasureRest<'_>,
    score_name: &str,
    state: &ValidationState,
    diag: &mut Emitter<'_>,
) -> bool {
    let Some(start) = rest.start() else {
        diag.error(&format!(
            "Multimeasure rest in score {score_name} is missing its start measure."
        ));
        return false;
    };
    let Some(start_position) = state.measures.position(&start) else {
        diag.error(&format!(
            "Multimeasure rest in score {score_name} references non-existent measure {start}."
        ));
        return false;
    };
    let Some(duration) = rest.duration() else {
        diag.error(&format!(
            "Multimeasure rest at measure {start} in score {score_name} \
             is missing its duration."
        ));
        return false;
    };
    if start_position as u64 + duration >= state.measure_count as u64 {
        diag.error(&format!(
            "Multimeasure rest at measure {start} in score {score_name} \
             spans non-existent measures."
        ));
        return false;
    }
    true
}
