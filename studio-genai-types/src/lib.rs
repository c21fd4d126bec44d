//! Shared wire types for the studio image generation client.

mod base64_serde;

pub mod content;
pub mod http;
pub mod images;
pub mod models;
pub mod response;
pub mod style;
