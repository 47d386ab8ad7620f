//! Traits shared across the workspace

pub mod serialize;

pub use serialize::{Serialize, SerializeSecret};
