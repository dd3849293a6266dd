pub mod error;
pub mod format;
pub mod output;
pub mod report;

pub use error::*;
pub use output::*;
