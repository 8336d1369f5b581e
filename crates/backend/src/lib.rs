pub mod api;
pub mod error;
pub mod health;
pub mod types;

pub use api::{BackendApi, ClientSettings};
pub use error::{ApiError, ApiResult};
pub use health::HealthMonitor;
pub use types::*;
