//! Environment-driven configuration for the server binary.

use std::net::SocketAddr;

use anyhow::Context;

use crate::error::Result;

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/taxonomy";
const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `TAXONOMY_BIND` and `TAXONOMY_DB_POOL`, falling
    /// back to development defaults.
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind = std::env::var("TAXONOMY_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .with_context(|| format!("invalid TAXONOMY_BIND address: {bind}"))?;

        let pool_size = match std::env::var("TAXONOMY_DB_POOL") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid TAXONOMY_DB_POOL value: {raw}"))?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
        })
    }
}
