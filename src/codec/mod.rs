//! Conversion between geometry primitives and interchange elements.
//!
//! Encode and decode are pure per-element functions; batching, grouping and
//! file I/O live in [`crate::export`] and [`crate::import`]. Both directions
//! apply the configured unit conversion symmetrically.

pub mod decode;
pub mod encode;

pub use decode::decode_element;
pub use encode::encode_primitive;
