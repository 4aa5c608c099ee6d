pub mod api;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod notifier;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{AppError, DeliveryError, Result};
pub use notifier::{InvitationNotifier, NotifierSettings};
pub use state::AppState;
