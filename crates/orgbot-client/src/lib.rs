//! HTTP transport for orgbot's query, listing and creation boundaries.

pub mod http;

pub use http::HttpServiceClient;
