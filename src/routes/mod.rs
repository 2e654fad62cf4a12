pub mod health_checks;
pub mod history;

pub use health_checks::*;
pub use history::*;
