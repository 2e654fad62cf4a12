//! External service connectors.
//!
//! Every outbound integration is a trait plus an HTTP implementation, so routes and health
//! checks depend on the trait object and tests can swap in a stub.

pub mod errors;
pub mod yunikorn;

pub use errors::ConnectorError;
pub use yunikorn::{
    HealthCheckInfo, SchedulerHealthInfo, YunikornClient, YunikornConnector,
    ROUTE_SCHEDULER_HEALTHCHECK,
};
