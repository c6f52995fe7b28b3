pub mod aggregate;
pub mod evaluation;
pub mod report;

pub use aggregate::{compute, meets_threshold, subject_average, weighted_average, Weighted};
pub use evaluation::Evaluation;
pub use report::{BlockResult, Overall, Report, SemesterResult, SubjectResult};
