//! MCP server command

use anyhow::Result;
use zenmo_core::ZenMoneyClient;

pub async fn cmd_serve(client: &ZenMoneyClient, host: &str, port: u16, stdio: bool) -> Result<()> {
    if stdio {
        // stdout belongs to the MCP client in stdio mode, so no banner
        return zenmo_server::serve_stdio(client.clone()).await;
    }

    println!("🚀 Starting Zenmo MCP server...");
    println!("   ZenMoney API: {}", client.base_url());
    println!("   Listening: http://{}:{}/mcp", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    zenmo_server::start_mcp_server(client.clone(), host, port).await
}
