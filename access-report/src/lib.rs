pub mod analytics;
pub mod args;
pub mod error;
pub mod ingest;
pub mod invariants;
pub mod models;
pub mod parser;
pub mod rank;
pub mod report;
pub mod status;
