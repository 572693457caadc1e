mod client;
mod error;

pub use client::{ApiClient, CSRF_HEADER};
pub use error::{ApiError, ApiResult};
