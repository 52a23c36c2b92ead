mod client;
mod error;

pub use client::{ApiClient, TranslationOptions, TranslationResponse, UploadResponse};
pub use error::ApiError;
