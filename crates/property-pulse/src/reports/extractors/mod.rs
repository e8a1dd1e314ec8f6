//! Raw payload to flat record, one module per report type. Every extractor
//! takes `Option<&Value>`: `None` is what the fetch layer hands over after a
//! transport failure.

pub mod aged_receivables;
pub mod box_score;
pub mod comparative_delinquency;
pub mod resident_retention;

pub use aged_receivables::extract_delinquency;
pub use box_score::{extract_box_score, BoxScoreExtract};
pub use comparative_delinquency::extract_rent_metrics;
pub use resident_retention::extract_resident_retention;
