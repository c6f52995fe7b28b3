use serde::{Deserialize, Serialize};

use crate::model::{Block, Semester, Settings};

/// Target grouping configuration for a dataset.
///
/// Example YAML:
/// ```yaml
/// hasBlocks: true
/// hasSemesters: false
/// compensationBetweenBlocks: false
/// validationThreshold: 10
/// blocks:
///   - { id: 1, name: "Sciences" }
///   - { id: 2, name: "Humanities" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StructureConfig {
    #[serde(flatten)]
    pub settings: Settings,

    /// Authoritative block list when `hasBlocks` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,

    /// Authoritative semester list when `hasSemesters` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semesters: Option<Vec<Semester>>,
}
