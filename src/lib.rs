pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod engine;
pub mod model;
pub mod output;
pub mod storage;
pub mod validation;

pub use convert::{convert, Conversion, ConvertError};
pub use engine::{compute, Report};
