//! Utilities shared across modules

mod constants;

pub use constants::{CONNECT_TIMEOUT, IMAGE_API_TIMEOUT};
