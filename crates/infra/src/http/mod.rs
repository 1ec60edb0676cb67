//! HTTP client plumbing shared by the external integrations

mod client;

pub use client::{HttpClient, HttpClientBuilder};
