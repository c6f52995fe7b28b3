pub mod types;

pub use types::{Block, Dataset, Exam, Mode, Semester, Settings, Subject};

/// Lowest grade an exam can receive
pub const GRADE_MIN: f64 = 0.0;

/// Highest grade an exam can receive
pub const GRADE_MAX: f64 = 20.0;

/// Tolerance for percentage totals and threshold comparisons
pub const EPSILON: f64 = 0.001;

/// Maximum number of subjects accepted when creating a dataset
pub const MAX_SUBJECTS: usize = 50;
