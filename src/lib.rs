pub mod codec;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod import;
pub mod math;
pub mod tessellation;
pub mod units;

pub use error::{CurvexError, Result};
