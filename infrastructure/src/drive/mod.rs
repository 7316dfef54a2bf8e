//! Google Drive v3 adapter
//!
//! - [`DriveApiClient`] implements the application's `DriveGateway` over HTTP
//! - [`TokenProvider`] turns a refresh token into cached access tokens

mod auth;
mod client;

pub use auth::TokenProvider;
pub use client::{
    DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL, DEFAULT_UPLOAD_BASE_URL, DriveApiClient,
    DriveEndpoints, build_http_client,
};
