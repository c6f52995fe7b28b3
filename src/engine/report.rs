use serde::Serialize;

use super::evaluation::Evaluation;
use crate::diagnostics::Warning;
use crate::model::{Exam, Mode};

/// A subject with its computed average.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub id: u32,
    pub name: String,
    pub weight: f64,
    pub exams: Vec<Exam>,
    pub average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockResult {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<u32>,
    pub average: f64,
    pub validated: bool,
    pub subjects: Vec<SubjectResult>,
}

/// Semester averages are informational; there is no `validated` flag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SemesterResult {
    pub id: u32,
    pub name: String,
    pub average: f64,
    pub subjects: Vec<SubjectResult>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overall {
    pub average: f64,
    pub validated: bool,
    pub evaluation: Evaluation,
}

/// Output of [`compute`](super::compute). Averages keep full precision;
/// rounding belongs to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub mode: Mode,
    pub validation_threshold: f64,
    pub compensation_between_subjects: bool,
    pub compensation_between_blocks: bool,
    pub subjects: Vec<SubjectResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semesters: Option<Vec<SemesterResult>>,
    pub overall: Overall,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}
