//! Application-level configuration.
//!
//! - [`SessionParams`]: settings that shape an exam attempt (narration language)

pub mod session_params;

pub use session_params::{DEFAULT_NARRATION_LANGUAGE, SessionParams};
