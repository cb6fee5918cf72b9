//! MCP server for the PoloMarket identity services.

pub mod handlers;

pub use handlers::IdentityMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdio until the client disconnects.
pub async fn run_server(server: IdentityMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
