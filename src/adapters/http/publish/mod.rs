//! HTTP adapter for publish endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, MessageDto, PublishAcceptedResponse, PublishRequestDto,
};
pub use handlers::PublishAppState;
pub use routes::{health_routes, publish_routes};
