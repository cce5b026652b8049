pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod report;
pub mod sections;
