//! Remote booking API.
//!
//! The backend is a plain JSON REST service with three read endpoints.
//! [`RemoteApi`] is the seam the rest of the crate depends on;
//! [`ApiClient`] is its HTTP implementation.

mod client;
mod error;
mod remote;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use remote::RemoteApi;
