//! Interactive console adapters

pub mod input;
pub mod session;

pub use input::ConsoleInput;
pub use session::ConsoleSessionInteraction;
