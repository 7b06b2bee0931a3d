pub mod config;
pub mod directory;
pub mod error;
pub mod types;

pub use config::OrgbotConfig;
pub use directory::OrganizationDirectory;
pub use error::{CoreError, Result, TransportError};
pub use types::*;
