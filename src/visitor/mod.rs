pub mod identity;
pub(crate) mod lenient;
pub mod types;

pub use identity::{hash_string, visitor_id};
pub use types::{DeviceClass, Resolution, VisitorAttributes};
