//! Sample endpoints' business logic and the pub/sub receiver handler.

pub mod handler;
pub mod model;
pub mod service;

pub use handler::SampleReceiverHandler;
pub use model::{
    GetSampleModel, GetSampleResponse, PostSampleXmlModel, PostSampleXmlResponse, PublishModel,
    PublishResponse, UpdateSampleModel, UpdateSampleResponse,
};
pub use service::SampleService;
