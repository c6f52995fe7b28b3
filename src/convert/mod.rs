use std::fmt;

use tracing::{debug, warn};

use crate::config::StructureConfig;
use crate::diagnostics::{GroupKind, Warning};
use crate::model::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    InvalidInput(String),
    MissingGroupDefinition(GroupKind),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidInput(what) => write!(f, "Invalid input: {}", what),
            ConvertError::MissingGroupDefinition(kind) => write!(
                f,
                "The configuration enables {kind}s but defines no {kind}",
                kind = kind
            ),
        }
    }
}

impl std::error::Error for ConvertError {}

/// A reshaped dataset plus the consistency warnings found while reshaping.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub dataset: Dataset,
    pub warnings: Vec<Warning>,
}

/// Reshape a dataset to a new grouping configuration.
///
/// The input is never modified; on error nothing is produced. Enabled groups
/// take the configuration's lists verbatim. Disabled groups are dropped along
/// with the matching subject associations. Subjects missing a required
/// association, or pointing at a group the new list does not define, are
/// kept as-is and reported.
pub fn convert(
    dataset: Option<&Dataset>,
    new_config: Option<&StructureConfig>,
) -> Result<Conversion, ConvertError> {
    let dataset =
        dataset.ok_or_else(|| ConvertError::InvalidInput("existing dataset is missing".into()))?;
    let new_config = new_config
        .ok_or_else(|| ConvertError::InvalidInput("new configuration is missing".into()))?;

    let blocks = required_groups(
        new_config.settings.has_blocks,
        new_config.blocks.as_deref(),
        GroupKind::Block,
    )?;
    let semesters = required_groups(
        new_config.settings.has_semesters,
        new_config.semesters.as_deref(),
        GroupKind::Semester,
    )?;

    let block_ids: Vec<u32> = blocks.iter().flatten().map(|b| b.id).collect();
    let semester_ids: Vec<u32> = semesters.iter().flatten().map(|s| s.id).collect();

    let mut reshaped = dataset.clone();
    reshaped.settings = new_config.settings.clone();
    reshaped.blocks = blocks;
    reshaped.semesters = semesters;

    let mut warnings = Vec::new();
    for subject in &mut reshaped.subjects {
        if new_config.settings.has_blocks {
            warnings.extend(check_association(
                subject.id,
                &subject.name,
                subject.block_id,
                &block_ids,
                GroupKind::Block,
            ));
        } else {
            subject.block_id = None;
        }

        if new_config.settings.has_semesters {
            warnings.extend(check_association(
                subject.id,
                &subject.name,
                subject.semester_id,
                &semester_ids,
                GroupKind::Semester,
            ));
        } else {
            subject.semester_id = None;
        }
    }

    debug!(
        "Converted dataset {:?} -> {:?} ({} subjects, {} warnings)",
        dataset.mode(),
        reshaped.mode(),
        reshaped.subjects.len(),
        warnings.len()
    );

    Ok(Conversion {
        dataset: reshaped,
        warnings,
    })
}

/// Group list for the reshaped dataset: a copy of the configured list when
/// the grouping is enabled, nothing otherwise.
fn required_groups<T: Clone>(
    enabled: bool,
    groups: Option<&[T]>,
    kind: GroupKind,
) -> Result<Option<Vec<T>>, ConvertError> {
    if !enabled {
        return Ok(None);
    }
    match groups {
        Some(groups) if !groups.is_empty() => Ok(Some(groups.to_vec())),
        _ => Err(ConvertError::MissingGroupDefinition(kind)),
    }
}

/// Warning for a subject whose association is missing or points at a group
/// the new list no longer defines. The association itself is left untouched.
fn check_association(
    subject_id: u32,
    name: &str,
    group_id: Option<u32>,
    known: &[u32],
    group: GroupKind,
) -> Option<Warning> {
    match group_id {
        None => {
            warn!("Subject '{}' has no associated {}", name, group);
            Some(Warning::UnassociatedSubject {
                subject_id,
                subject: name.to_string(),
                group,
            })
        }
        Some(id) if !known.contains(&id) => {
            warn!("Subject '{}' references unknown {} id {}", name, group, id);
            Some(Warning::UnknownGroup {
                subject_id,
                subject: name.to_string(),
                group,
                group_id: id,
            })
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Exam, Mode, Semester, Settings, Subject};

    fn sample_subject(id: u32, block_id: Option<u32>, semester_id: Option<u32>) -> Subject {
        Subject {
            id,
            name: format!("Subject {}", id),
            weight: id as f64,
            exams: vec![
                Exam {
                    grade: 12.0,
                    percentage: 50.0,
                },
                Exam {
                    grade: 15.0,
                    percentage: 50.0,
                },
            ],
            block_id,
            semester_id,
        }
    }

    fn blocks() -> Vec<Block> {
        vec![
            Block {
                id: 1,
                name: "Core".to_string(),
                semester_id: None,
            },
            Block {
                id: 2,
                name: "Options".to_string(),
                semester_id: None,
            },
        ]
    }

    fn semesters() -> Vec<Semester> {
        vec![Semester {
            id: 1,
            name: "Autumn".to_string(),
        }]
    }

    fn flat_dataset() -> Dataset {
        Dataset {
            settings: Settings::default(),
            subjects: vec![sample_subject(1, None, None), sample_subject(2, None, None)],
            blocks: None,
            semesters: None,
        }
    }

    fn config(has_blocks: bool, has_semesters: bool) -> StructureConfig {
        StructureConfig {
            settings: Settings {
                has_blocks,
                has_semesters,
                ..Settings::default()
            },
            blocks: has_blocks.then(blocks),
            semesters: has_semesters.then(semesters),
        }
    }

    #[test]
    fn test_missing_arguments_are_invalid_input() {
        let data = flat_dataset();
        let cfg = config(false, false);

        assert!(matches!(
            convert(None, Some(&cfg)),
            Err(ConvertError::InvalidInput(_))
        ));
        assert!(matches!(
            convert(Some(&data), None),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_enable_blocks_without_list_fails() {
        let data = flat_dataset();
        let mut cfg = config(true, false);
        cfg.blocks = Some(vec![]);

        let err = convert(Some(&data), Some(&cfg)).unwrap_err();
        assert_eq!(err, ConvertError::MissingGroupDefinition(GroupKind::Block));

        cfg.blocks = None;
        let err = convert(Some(&data), Some(&cfg)).unwrap_err();
        assert_eq!(err, ConvertError::MissingGroupDefinition(GroupKind::Block));
    }

    #[test]
    fn test_enable_semesters_without_list_fails() {
        let data = flat_dataset();
        let mut cfg = config(false, true);
        cfg.semesters = None;

        let err = convert(Some(&data), Some(&cfg)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingGroupDefinition(GroupKind::Semester)
        );
        assert!(err.to_string().contains("semester"));
    }

    #[test]
    fn test_enable_blocks_warns_for_unassociated_subjects() {
        let mut data = flat_dataset();
        data.subjects[0].block_id = Some(2);

        let result = convert(Some(&data), Some(&config(true, false))).unwrap();
        assert_eq!(result.dataset.mode(), Mode::Blocks);
        assert_eq!(result.dataset.blocks, Some(blocks()));
        assert!(result.dataset.semesters.is_none());
        assert_eq!(result.dataset.subjects[0].block_id, Some(2));
        assert_eq!(result.dataset.subjects[1].block_id, None);
        assert_eq!(
            result.warnings,
            vec![Warning::UnassociatedSubject {
                subject_id: 2,
                subject: "Subject 2".to_string(),
                group: GroupKind::Block,
            }]
        );
    }

    #[test]
    fn test_new_block_list_replaces_old_one() {
        let mut data = flat_dataset();
        data.settings.has_blocks = true;
        data.blocks = Some(vec![Block {
            id: 9,
            name: "Old".to_string(),
            semester_id: None,
        }]);

        let result = convert(Some(&data), Some(&config(true, false))).unwrap();
        assert_eq!(result.dataset.blocks, Some(blocks()));
    }

    #[test]
    fn test_dropped_block_reference_is_reported() {
        let mut data = flat_dataset();
        data.settings.has_blocks = true;
        data.blocks = Some(vec![Block {
            id: 9,
            name: "Old".to_string(),
            semester_id: None,
        }]);
        data.subjects[0].block_id = Some(9);
        data.subjects[1].block_id = Some(1);

        let result = convert(Some(&data), Some(&config(true, false))).unwrap();

        // The stale id is kept, not repaired
        assert_eq!(result.dataset.subjects[0].block_id, Some(9));
        assert_eq!(
            result.warnings,
            vec![Warning::UnknownGroup {
                subject_id: 1,
                subject: "Subject 1".to_string(),
                group: GroupKind::Block,
                group_id: 9,
            }]
        );
    }

    #[test]
    fn test_dropped_semester_reference_is_reported() {
        let mut data = flat_dataset();
        data.subjects[0].semester_id = Some(1);
        data.subjects[1].semester_id = Some(4);

        let result = convert(Some(&data), Some(&config(false, true))).unwrap();
        assert_eq!(
            result.warnings,
            vec![Warning::UnknownGroup {
                subject_id: 2,
                subject: "Subject 2".to_string(),
                group: GroupKind::Semester,
                group_id: 4,
            }]
        );
    }

    #[test]
    fn test_settings_are_overwritten() {
        let data = flat_dataset();
        let mut cfg = config(false, false);
        cfg.settings.validation_threshold = 12.0;
        cfg.settings.compensation_between_subjects = true;

        let result = convert(Some(&data), Some(&cfg)).unwrap();
        assert_eq!(result.dataset.settings.validation_threshold, 12.0);
        assert!(result.dataset.settings.compensation_between_subjects);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_blocks_round_trip_strips_block_ids() {
        let mut data = flat_dataset();
        data.settings.has_blocks = true;
        data.blocks = Some(blocks());
        data.subjects[0].block_id = Some(1);
        data.subjects[1].block_id = Some(2);

        let disabled = convert(Some(&data), Some(&config(false, false))).unwrap();
        assert!(disabled.dataset.blocks.is_none());
        assert!(disabled.dataset.subjects.iter().all(|s| s.block_id.is_none()));

        let enabled = convert(Some(&disabled.dataset), Some(&config(true, false))).unwrap();
        assert_eq!(enabled.dataset.blocks, Some(blocks()));
        for (before, after) in data.subjects.iter().zip(&enabled.dataset.subjects) {
            assert_eq!(before.name, after.name);
            assert_eq!(before.weight, after.weight);
            assert_eq!(before.exams, after.exams);
            assert_eq!(after.block_id, None);
        }
        assert_eq!(enabled.warnings.len(), 2);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let mut data = flat_dataset();
        data.settings.has_semesters = true;
        data.semesters = Some(semesters());
        data.subjects[0].semester_id = Some(1);
        let before = data.clone();

        let _ = convert(Some(&data), Some(&config(true, false))).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_error_leaves_nothing_partial() {
        let data = flat_dataset();
        let mut cfg = config(true, true);
        cfg.semesters = Some(vec![]);

        // Blocks are valid but semesters are not: the whole call fails
        assert_eq!(
            convert(Some(&data), Some(&cfg)).unwrap_err(),
            ConvertError::MissingGroupDefinition(GroupKind::Semester)
        );
    }

    #[test]
    fn test_all_state_transitions() {
        let states = [(false, false), (true, false), (false, true), (true, true)];
        for &(from_blocks, from_semesters) in &states {
            let start = convert(
                Some(&flat_dataset()),
                Some(&config(from_blocks, from_semesters)),
            )
            .unwrap()
            .dataset;

            for &(to_blocks, to_semesters) in &states {
                let result = convert(Some(&start), Some(&config(to_blocks, to_semesters)))
                    .unwrap()
                    .dataset;

                assert_eq!(result.settings.has_blocks, to_blocks);
                assert_eq!(result.settings.has_semesters, to_semesters);
                assert_eq!(result.blocks.is_some(), to_blocks);
                assert_eq!(result.semesters.is_some(), to_semesters);
                assert_eq!(result.subjects.len(), 2);
            }
        }
    }
}
