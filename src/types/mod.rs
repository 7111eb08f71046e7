pub mod diagnostics;
pub mod error;
pub mod month;
pub mod record;
pub mod station;
