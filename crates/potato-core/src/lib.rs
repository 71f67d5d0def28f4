pub mod config;
pub mod error;

pub use config::PotatoConfig;
pub use error::{PotatoError, Result};
