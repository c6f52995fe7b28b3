use serde::Serialize;
use std::fmt;

/// Which kind of grouping a diagnostic refers to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GroupKind {
    Block,
    Semester,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKind::Block => write!(f, "block"),
            GroupKind::Semester => write!(f, "semester"),
        }
    }
}

/// Non-fatal consistency problem. Reported to the caller, never repaired.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Warning {
    /// Subject has no association to a group the configuration requires
    UnassociatedSubject {
        subject_id: u32,
        subject: String,
        group: GroupKind,
    },
    /// Subject points at a group id that is not defined
    UnknownGroup {
        subject_id: u32,
        subject: String,
        group: GroupKind,
        group_id: u32,
    },
    /// Group has no member subjects
    EmptyGroup {
        group: GroupKind,
        group_id: u32,
        name: String,
    },
    /// Subject has no recorded exams and counts as 0
    NoExams { subject_id: u32, subject: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnassociatedSubject { subject, group, .. } => {
                write!(f, "Subject '{}' has no associated {}", subject, group)
            }
            Warning::UnknownGroup {
                subject,
                group,
                group_id,
                ..
            } => write!(
                f,
                "Subject '{}' references unknown {} id {}",
                subject, group, group_id
            ),
            Warning::EmptyGroup { group, name, .. } => {
                write!(f, "The {} '{}' contains no subjects", group, name)
            }
            Warning::NoExams { subject, .. } => {
                write!(f, "Subject '{}' has no recorded exams", subject)
            }
        }
    }
}
