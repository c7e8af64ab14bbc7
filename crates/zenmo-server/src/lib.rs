//! Zenmo MCP Server
//!
//! Exposes a ZenMoney account to LLM clients via MCP (Model Context
//! Protocol) tools. Two transports are supported:
//! - Streamable HTTP under `/mcp` for local network access
//! - stdio for desktop MCP clients (Claude Desktop, etc.)
//!
//! All tool implementations live in `zenmo_core::tools`; this crate only
//! wires them to the MCP protocol.

pub mod mcp;

pub use mcp::{serve_stdio, start_mcp_server, ZenmoMcpServer};
