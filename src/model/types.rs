use serde::{Deserialize, Serialize};

/// A single graded assessment inside a subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub grade: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: u32,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<u32>,
}

impl Subject {
    /// Sum of the exam percentages (should be 100 for a complete subject)
    pub fn percentage_total(&self) -> f64 {
        self.exams.iter().map(|e| e.percentage).sum()
    }
}

/// Cross-cutting group of subjects with its own pass/fail threshold check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<u32>,
}

/// Time-based group of subjects. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Semester {
    pub id: u32,
    pub name: String,
}

/// The scalar configuration fields shared by a dataset and a structure config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub has_blocks: bool,
    #[serde(default)]
    pub has_semesters: bool,
    #[serde(default)]
    pub compensation_between_subjects: bool,
    #[serde(default)]
    pub compensation_between_blocks: bool,
    #[serde(default = "default_threshold")]
    pub validation_threshold: f64,
}

fn default_threshold() -> f64 {
    10.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_blocks: false,
            has_semesters: false,
            compensation_between_subjects: false,
            compensation_between_blocks: false,
            validation_threshold: default_threshold(),
        }
    }
}

impl Settings {
    pub fn mode(&self) -> Mode {
        match (self.has_blocks, self.has_semesters) {
            (false, false) => Mode::Flat,
            (true, false) => Mode::Blocks,
            (false, true) => Mode::Semesters,
            (true, true) => Mode::BlocksAndSemesters,
        }
    }
}

/// Grouping mode, derived from the `hasBlocks`/`hasSemesters` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Flat,
    Blocks,
    Semesters,
    BlocksAndSemesters,
}

impl Mode {
    pub fn uses_blocks(self) -> bool {
        matches!(self, Mode::Blocks | Mode::BlocksAndSemesters)
    }

    pub fn uses_semesters(self) -> bool {
        matches!(self, Mode::Semesters | Mode::BlocksAndSemesters)
    }
}

/// The aggregate root: configuration, subjects and the optional group lists.
///
/// Persisted as a single JSON document; the field names are relied on by
/// exporters and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semesters: Option<Vec<Semester>>,
}

impl Dataset {
    pub fn mode(&self) -> Mode {
        self.settings.mode()
    }

    pub fn block(&self, id: u32) -> Option<&Block> {
        self.blocks.as_deref()?.iter().find(|b| b.id == id)
    }

    pub fn semester(&self, id: u32) -> Option<&Semester> {
        self.semesters.as_deref()?.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.has_blocks);
        assert!(!settings.has_semesters);
        assert!(!settings.compensation_between_subjects);
        assert!(!settings.compensation_between_blocks);
        assert_eq!(settings.validation_threshold, 10.0);
        assert_eq!(settings.mode(), Mode::Flat);
    }

    #[test]
    fn test_mode_from_flags() {
        let mut settings = Settings::default();
        settings.has_blocks = true;
        assert_eq!(settings.mode(), Mode::Blocks);
        settings.has_semesters = true;
        assert_eq!(settings.mode(), Mode::BlocksAndSemesters);
        settings.has_blocks = false;
        assert_eq!(settings.mode(), Mode::Semesters);
        assert!(settings.mode().uses_semesters());
        assert!(!settings.mode().uses_blocks());
    }

    #[test]
    fn test_parse_dataset_json() {
        let json = r#"{
            "hasBlocks": true,
            "hasSemesters": false,
            "compensationBetweenSubjects": false,
            "compensationBetweenBlocks": true,
            "validationThreshold": 10,
            "subjects": [
                {"id": 1, "name": "Maths", "weight": 2, "blockId": 1,
                 "exams": [{"grade": 14, "percentage": 60}, {"grade": 10, "percentage": 40}]}
            ],
            "blocks": [{"id": 1, "name": "Sciences"}]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.mode(), Mode::Blocks);
        assert!(dataset.settings.compensation_between_blocks);
        assert_eq!(dataset.subjects[0].block_id, Some(1));
        assert_eq!(dataset.subjects[0].semester_id, None);
        assert_eq!(dataset.subjects[0].percentage_total(), 100.0);
        assert_eq!(dataset.block(1).map(|b| b.name.as_str()), Some("Sciences"));
        assert!(dataset.block(2).is_none());
        assert!(dataset.semester(1).is_none());
    }

    #[test]
    fn test_serialize_omits_absent_groups() {
        let dataset = Dataset {
            settings: Settings::default(),
            subjects: vec![Subject {
                id: 1,
                name: "History".to_string(),
                weight: 1.0,
                exams: vec![],
                block_id: None,
                semester_id: None,
            }],
            blocks: None,
            semesters: None,
        };
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["hasBlocks"], false);
        assert_eq!(value["validationThreshold"], 10.0);
        assert!(value.get("blocks").is_none());
        assert!(value.get("semesters").is_none());
        assert!(value["subjects"][0].get("blockId").is_none());
    }

    #[test]
    fn test_missing_threshold_uses_default() {
        let dataset: Dataset = serde_json::from_str(r#"{"subjects": []}"#).unwrap();
        assert_eq!(dataset.settings.validation_threshold, 10.0);
        assert_eq!(dataset.mode(), Mode::Flat);
    }
}
