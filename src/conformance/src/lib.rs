pub use check::Check;
pub use error::{CheckError, SuiteError};
pub use report::{Outcome, Report};
pub use settings::{SuiteSettings, Waits};
pub use suite::Suite;

pub mod check;
mod checks;
pub mod error;
pub mod report;
pub mod settings;
pub mod suite;
