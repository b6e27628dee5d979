pub mod export;
pub mod github;
pub mod report;
