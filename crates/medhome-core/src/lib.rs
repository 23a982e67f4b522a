//! Ambient plumbing shared by Medhome services: request-id tagging and
//! tracing setup. Anything service-specific (health probes, response
//! serializers) lives with the service that owns it.

pub mod middleware;
pub mod tracing;
