use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

use crate::config::StructureConfig;
use crate::model::{Dataset, Subject};
use crate::validation::validate_subject_count;

/// Load a dataset from a JSON file
///
/// If the file doesn't exist, returns `None`.
pub fn load_dataset(path: &Path) -> Result<Option<Dataset>> {
    if !path.exists() {
        debug!("No dataset at {}", path.display());
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file at {}", path.display()))?;

    let dataset: Dataset = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;

    Ok(Some(dataset))
}

/// Save a dataset to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if needed.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, dataset).context("Failed to serialize dataset")?;

    file.commit().context("Failed to save dataset")?;

    debug!("Saved {} subjects to {}", dataset.subjects.len(), path.display());
    Ok(())
}

/// Delete the stored dataset. A missing file is not an error.
pub fn reset_dataset(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove dataset at {}", path.display())),
    }
}

/// Build the initial dataset for a structure: `subject_count` placeholder
/// subjects with weight 1 and no exams, ids starting at 1.
///
/// Group lists are copied from the configuration as given; subjects start
/// without associations.
pub fn new_dataset(config: &StructureConfig, subject_count: usize) -> Result<Dataset> {
    validate_subject_count(subject_count).map_err(anyhow::Error::msg)?;

    let subjects = (1..=subject_count as u32)
        .map(|id| Subject {
            id,
            name: format!("Subject {}", id),
            weight: 1.0,
            exams: Vec::new(),
            block_id: None,
            semester_id: None,
        })
        .collect();

    Ok(Dataset {
        settings: config.settings.clone(),
        subjects,
        blocks: config
            .blocks
            .clone()
            .filter(|_| config.settings.has_blocks),
        semesters: config
            .semesters
            .clone()
            .filter(|_| config.settings.has_semesters),
    })
}
