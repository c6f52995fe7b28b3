pub mod formatter;

pub use formatter::{format_average, format_json, format_report, format_warnings, should_use_colors};
