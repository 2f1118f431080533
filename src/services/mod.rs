pub mod api_client;
pub mod auth_service;
pub mod image_service;

pub use api_client::{ApiClient, ApiEnvelope, ApiError, TransitionPayload};
pub use auth_service::{is_authenticated, login, logout};
pub use image_service::{fetch_image, ImageHandle};
