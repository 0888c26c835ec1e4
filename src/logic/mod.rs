pub mod advisor;
pub mod aggregator;
pub mod recommend;
pub mod scoring;
pub mod timeline;
pub mod timeseries;

pub use advisor::{AdvisorSettings, ClimateAdvisor};
pub use recommend::RecommendationEngine;
pub use timeseries::ClimateTables;
