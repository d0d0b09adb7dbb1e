pub mod convert;
pub mod report;
pub mod setup;
pub mod total;
pub mod ui;
