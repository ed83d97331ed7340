//! Core types shared across apimlint: fatal error handling and user-facing
//! error presentation.

pub mod error;

pub use error::{ApimError, ErrorContext, user_friendly_error};
