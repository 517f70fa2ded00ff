//! Todo service library modules.
//!
//! Layout follows a hexagonal split: `domain` owns the entity, ports and
//! service; `inbound::http` adapts Actix requests onto the driving ports;
//! `outbound::persistence` implements the repository port with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
