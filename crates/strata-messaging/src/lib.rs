//! # strata-messaging
//!
//! Google Cloud Pub/Sub integration over the REST v1 API.
//!
//! - [`client`]: thin `reqwest` wrapper for publish, pull and acknowledge
//! - [`publisher`]: publishes sample messages with default attributes
//! - [`receiver`]: supervised pull loops with duplicate suppression

pub mod client;
pub mod message;
pub mod publisher;
pub mod receiver;

pub use client::PubSubClient;
pub use message::ReceivedMessage;
pub use publisher::{DisabledPublisher, PubSubSamplePublisher, SamplePublisher};
pub use receiver::{MessageHandler, MessageSource, SampleReceiver, SubscriptionSource};
