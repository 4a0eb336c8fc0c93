use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("MARKET_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("MARKET_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("MARKET_PORT must be a port number")?;
        let db_path: PathBuf = lookup("MARKET_DB_PATH")
            .unwrap_or_else(|| "market.db".into())
            .into();
        let api_prefix = lookup("MARKET_API_PREFIX").unwrap_or_else(|| "/api".into());

        if !api_prefix.starts_with('/') || api_prefix.len() < 2 || api_prefix.ends_with('/') {
            bail!("MARKET_API_PREFIX must look like /segment, got '{}'", api_prefix);
        }

        Ok(Self {
            host,
            port,
            db_path,
            api_prefix,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
