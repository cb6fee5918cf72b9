//! Construction tests for the MCP server.

use polomarket_identity::repositories::{InMemoryUserRepository, UserRepository};
use polomarket_identity::services::{RegistrationService, RegistrationServiceImpl};
use polomarket_identity::{IdentityMcpServer, MetricsTracker};
use rmcp::ServerHandler;
use std::sync::Arc;

fn build_server(name: &str) -> IdentityMcpServer {
    let metrics = MetricsTracker::new();
    let users = Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>;
    let registration = Arc::new(RegistrationServiceImpl::new(users, false, 50, metrics.clone()))
        as Arc<dyn RegistrationService>;

    IdentityMcpServer::new(registration, metrics, name)
}

#[test]
fn test_server_info_reports_configured_name() {
    let server = build_server("polomarket-test");
    let info = server.get_info();

    assert_eq!(info.server_info.name, "polomarket-test");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.capabilities.tools.is_some());
}

#[test]
fn test_server_clones_share_metrics() {
    let server = build_server("polomarket-test");
    let clone = server.clone();

    clone.metrics().track_rut_validation(false);
    assert_eq!(server.metrics().rut_rejections_total(), 1);
}

#[test]
fn test_registration_service_usable_outside_runtime() {
    let users = Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>;
    let service = RegistrationServiceImpl::new(users, false, 50, MetricsTracker::new());

    let found = tokio_test::block_on(service.lookup_by_rut("12345678-5")).unwrap();
    assert!(found.is_none());
}
