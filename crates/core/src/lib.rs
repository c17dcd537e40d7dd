#![forbid(unsafe_code)]

pub mod analysis;
pub mod health;
pub mod metrics;
pub mod mistakes;
pub mod trend;

pub use analysis::Analysis;
pub use metrics::{ScalarMetrics, extract_metrics};
