//! Numbered console menus

pub mod credentials;
pub mod generation_settings;
pub mod main_menu;

pub use credentials::{CredentialInput, CredentialPrompt};
pub use generation_settings::GenerationDialog;
pub use main_menu::{MainMenu, MenuChoice, Selection};
