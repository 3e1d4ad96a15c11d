pub mod aggregator;
pub mod exporters;
pub mod sla;
pub mod summary;
pub mod thresholds;

pub use aggregator::{RunAggregate, RunMetrics};
pub use sla::{evaluate, SlaReport};
pub use summary::{RunInfo, SummaryRecord};
pub use thresholds::{load_thresholds_from_file, Thresholds};
