pub mod behavior;
pub mod business;
pub mod config;
pub mod device;
pub mod engagement;
pub mod engine;
pub mod factors;
pub mod labels;
pub mod lead;
pub mod location;
pub mod professional;
pub mod risk;
pub mod rules;
pub mod technical;
pub mod validation;

pub use config::*;
pub use engine::{evaluate, Engine, IntelligenceReport};
pub use factors::{RangeOp, Tier};
pub use labels::Graded;
pub use rules::Rule;
pub use validation::{compile, validate_scoring};
