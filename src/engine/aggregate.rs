use tracing::{debug, warn};

use super::evaluation::Evaluation;
use super::report::{BlockResult, Overall, Report, SemesterResult, SubjectResult};
use crate::diagnostics::{GroupKind, Warning};
use crate::model::{Dataset, Subject, EPSILON};

/// Anything that can take part in a weighted average.
pub trait Weighted {
    fn average(&self) -> f64;
    fn weight(&self) -> f64;
}

impl Weighted for SubjectResult {
    fn average(&self) -> f64 {
        self.average
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Average of a subject: each grade scaled by its percentage share.
/// A subject without exams averages 0.
pub fn subject_average(subject: &Subject) -> f64 {
    subject
        .exams
        .iter()
        .map(|exam| exam.grade * (exam.percentage / 100.0))
        .sum()
}

/// `sum(average * weight) / sum(weight)`, or 0 when the total weight is not positive.
pub fn weighted_average<'a, T, I>(items: I) -> f64
where
    T: Weighted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (weighted_sum, total_weight) = items
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), item| {
            (sum + item.average() * item.weight(), total + item.weight())
        });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Threshold check with the shared tolerance.
pub fn meets_threshold(average: f64, threshold: f64) -> bool {
    average + EPSILON >= threshold
}

/// Compute every average and validation flag for a dataset.
///
/// Pure: the dataset is only read. Blocks and semesters are evaluated only
/// when enabled and defined. Overall validation with blocks requires every
/// block to pass on its own; compensation flags are reported, not applied.
pub fn compute(dataset: &Dataset) -> Report {
    let settings = &dataset.settings;
    let mode = settings.mode();
    let threshold = settings.validation_threshold;
    let mut warnings = Vec::new();

    let subjects: Vec<SubjectResult> = dataset
        .subjects
        .iter()
        .map(|subject| SubjectResult {
            id: subject.id,
            name: subject.name.clone(),
            weight: subject.weight,
            exams: subject.exams.clone(),
            average: subject_average(subject),
            block_id: subject.block_id,
            semester_id: subject.semester_id,
        })
        .collect();

    let blocks = match (&dataset.blocks, mode.uses_blocks()) {
        (Some(blocks), true) => Some(
            blocks
                .iter()
                .map(|block| {
                    let members: Vec<SubjectResult> = subjects
                        .iter()
                        .filter(|s| s.block_id == Some(block.id))
                        .cloned()
                        .collect();

                    if members.is_empty() {
                        warn!("Block '{}' contains no subjects", block.name);
                        warnings.push(Warning::EmptyGroup {
                            group: GroupKind::Block,
                            group_id: block.id,
                            name: block.name.clone(),
                        });
                        return BlockResult {
                            id: block.id,
                            name: block.name.clone(),
                            semester_id: block.semester_id,
                            average: 0.0,
                            validated: false,
                            subjects: members,
                        };
                    }

                    let average = weighted_average(&members);
                    BlockResult {
                        id: block.id,
                        name: block.name.clone(),
                        semester_id: block.semester_id,
                        average,
                        validated: meets_threshold(average, threshold),
                        subjects: members,
                    }
                })
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };

    let semesters = match (&dataset.semesters, mode.uses_semesters()) {
        (Some(semesters), true) => Some(
            semesters
                .iter()
                .map(|semester| {
                    let members: Vec<SubjectResult> = subjects
                        .iter()
                        .filter(|s| s.semester_id == Some(semester.id))
                        .cloned()
                        .collect();

                    if members.is_empty() {
                        warn!("Semester '{}' contains no subjects", semester.name);
                        warnings.push(Warning::EmptyGroup {
                            group: GroupKind::Semester,
                            group_id: semester.id,
                            name: semester.name.clone(),
                        });
                    }

                    SemesterResult {
                        id: semester.id,
                        name: semester.name.clone(),
                        average: weighted_average(&members),
                        subjects: members,
                    }
                })
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };

    let average = weighted_average(&subjects);
    let validated = match &blocks {
        Some(blocks) if !blocks.is_empty() => blocks.iter().all(|b| b.validated),
        _ => meets_threshold(average, threshold),
    };

    debug!(
        "Computed {} subjects, overall {:.3} (validated: {})",
        subjects.len(),
        average,
        validated
    );

    Report {
        mode,
        validation_threshold: threshold,
        compensation_between_subjects: settings.compensation_between_subjects,
        compensation_between_blocks: settings.compensation_between_blocks,
        subjects,
        blocks,
        semesters,
        overall: Overall {
            average,
            validated,
            evaluation: Evaluation::for_average(average),
        },
        warnings,
    }
}
