//! Request and response bodies specific to the HTTP layer.

pub mod request;
pub mod response;

pub use request::{InfoQuery, TokenRequest};
pub use response::{
    EndpointDetail, EndpointSummary, HealthResponse, IndexResponse, InfoResponse, UploadResponse,
};
