//! Pub/Sub payload models.

pub mod sample;

pub use sample::{DUMMY_ATTRIBUTE, DUMMY_ATTRIBUTE_VALUE, SampleMessage};
