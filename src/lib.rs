//! Deterministic rule-based visitor scoring.
//!
//! A [`VisitorAttributes`] record goes in, an [`IntelligenceReport`] comes
//! out. Nothing is retained between calls.
//!
//! ```no_run
//! use visitor_lens::{generate_report, VisitorAttributes};
//!
//! let attrs = VisitorAttributes::from_json_str(r#"{"device": "Desktop", "timeOnPage": 95}"#)?;
//! let report = generate_report(&attrs);
//! println!("{}", report.summary.lead_quality);
//! # Ok::<(), visitor_lens::EngineError>(())
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod output;
pub mod report;
pub mod scoring;
pub mod telemetry;
pub mod visitor;

pub use error::EngineError;
pub use report::{generate_report, Summary, VisitorReport};
pub use scoring::{evaluate, Engine, IntelligenceReport, ScoringConfig};
pub use visitor::{visitor_id, VisitorAttributes};
