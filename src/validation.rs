use crate::diagnostics::{GroupKind, Warning};
use crate::model::{Dataset, Exam, Subject, EPSILON, GRADE_MAX, GRADE_MIN, MAX_SUBJECTS};

/// Validate the number of subjects requested for a new dataset.
pub fn validate_subject_count(count: usize) -> Result<(), String> {
    if count < 1 {
        return Err("number of subjects must be at least 1".to_string());
    }
    if count > MAX_SUBJECTS {
        return Err(format!("number of subjects cannot exceed {}", MAX_SUBJECTS));
    }
    Ok(())
}

pub fn validate_exam(exam: &Exam, subject_name: &str) -> Result<(), String> {
    if !exam.grade.is_finite() || exam.grade < GRADE_MIN || exam.grade > GRADE_MAX {
        return Err(format!(
            "an exam grade for '{}' must be between {} and {} (got {})",
            subject_name, GRADE_MIN, GRADE_MAX, exam.grade
        ));
    }
    if !exam.percentage.is_finite() || exam.percentage <= 0.0 {
        return Err(format!(
            "an exam percentage for '{}' must be greater than 0 (got {})",
            subject_name, exam.percentage
        ));
    }
    Ok(())
}

/// True when the exam percentages add up to 100 within tolerance.
pub fn percentages_complete(exams: &[Exam]) -> bool {
    let total: f64 = exams.iter().map(|e| e.percentage).sum();
    (total - 100.0).abs() < EPSILON
}

/// Validate a subject before it is handed to the engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_subject(subject: &Subject) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let name = subject.name.as_str();

    if !subject.weight.is_finite() || subject.weight <= 0.0 {
        errors.push(format!(
            "subject '{}': weight must be greater than 0 (got {})",
            name, subject.weight
        ));
    }

    for (i, exam) in subject.exams.iter().enumerate() {
        if let Err(e) = validate_exam(exam, name) {
            errors.push(format!("subject '{}': exams[{}]: {}", name, i, e));
        }
    }

    // An exam-less subject is only a warning, see `consistency_warnings`
    if !subject.exams.is_empty() && !percentages_complete(&subject.exams) {
        errors.push(format!(
            "subject '{}': exam percentages must total 100% (currently {}%)",
            name,
            subject.percentage_total()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a whole dataset: every subject plus the structural invariants
/// tying group lists to the configuration flags.
pub fn validate_dataset(dataset: &Dataset) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let settings = &dataset.settings;

    let threshold = settings.validation_threshold;
    if !threshold.is_finite() || !(GRADE_MIN..=GRADE_MAX).contains(&threshold) {
        errors.push(format!(
            "validationThreshold: must be between {} and {} (got {})",
            GRADE_MIN, GRADE_MAX, threshold
        ));
    }

    match (settings.has_blocks, dataset.blocks.as_deref()) {
        (true, None) | (true, Some([])) => {
            errors.push("blocks: hasBlocks is set but no blocks are defined".to_string())
        }
        (false, Some(_)) => {
            errors.push("blocks: present but hasBlocks is not set".to_string())
        }
        _ => {}
    }
    match (settings.has_semesters, dataset.semesters.as_deref()) {
        (true, None) | (true, Some([])) => {
            errors.push("semesters: hasSemesters is set but no semesters are defined".to_string())
        }
        (false, Some(_)) => {
            errors.push("semesters: present but hasSemesters is not set".to_string())
        }
        _ => {}
    }

    let mut seen = std::collections::HashSet::new();
    for subject in &dataset.subjects {
        if !seen.insert(subject.id) {
            errors.push(format!("subjects: duplicate id {}", subject.id));
        }
        if let Err(subject_errors) = validate_subject(subject) {
            errors.extend(subject_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Association problems and missing exams. These never block a computation.
pub fn consistency_warnings(dataset: &Dataset) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let settings = &dataset.settings;

    for subject in &dataset.subjects {
        if subject.exams.is_empty() {
            warnings.push(Warning::NoExams {
                subject_id: subject.id,
                subject: subject.name.clone(),
            });
        }

        if settings.has_blocks {
            match subject.block_id {
                None => warnings.push(Warning::UnassociatedSubject {
                    subject_id: subject.id,
                    subject: subject.name.clone(),
                    group: GroupKind::Block,
                }),
                Some(id) if dataset.block(id).is_none() => warnings.push(Warning::UnknownGroup {
                    subject_id: subject.id,
                    subject: subject.name.clone(),
                    group: GroupKind::Block,
                    group_id: id,
                }),
                Some(_) => {}
            }
        }

        if settings.has_semesters {
            match subject.semester_id {
                None => warnings.push(Warning::UnassociatedSubject {
                    subject_id: subject.id,
                    subject: subject.name.clone(),
                    group: GroupKind::Semester,
                }),
                Some(id) if dataset.semester(id).is_none() => {
                    warnings.push(Warning::UnknownGroup {
                        subject_id: subject.id,
                        subject: subject.name.clone(),
                        group: GroupKind::Semester,
                        group_id: id,
                    })
                }
                Some(_) => {}
            }
        }
    }

    warnings
}
