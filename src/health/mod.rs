mod checks;
mod component;
mod context;
mod models;
mod service;

pub use checks::{DatabaseComponent, SchedulerComponent, POSTGRES_IDENTIFIER, YUNIKORN_IDENTIFIER};
pub use component::Component;
pub use context::{CheckContext, ContextError};
pub use models::{ComponentStatus, Status};
pub use service::{HealthService, HealthServiceError};
