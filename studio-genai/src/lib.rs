//! Resilient client for Gemini-style image generation and editing.
//!
//! ```no_run
//! use studio_genai::types::images::GenerationRequest;
//! use studio_genai::types::style::Style;
//! use studio_genai::Client;
//!
//! # async fn run() -> studio_genai::Result<()> {
//! let client = Client::from_env()?;
//! let image = client
//!     .images()
//!     .generate_image(GenerationRequest::new("a knight made of glass").with_style(Style::ActionFigure))
//!     .await?;
//! std::fs::write(format!("knight.{}", image.extension()), &image.data)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod http_response;
pub mod images;
pub mod prompt;
pub mod retry;
pub mod source;

#[cfg(test)]
mod test_support;

pub use studio_genai_types as types;
pub use tokio_util::sync::CancellationToken;

pub use client::{Client, ClientBuilder, ClientConfig, HttpOptions};
pub use error::{Error, ErrorKind, Result};
pub use images::Images;
pub use retry::{classify_failure, FailureClass, RetryPolicy};
pub use source::{read_source_image, read_source_image_with_mime};
