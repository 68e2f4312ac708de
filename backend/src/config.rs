use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DATA_DIR: &str = "./data";

/// Runtime configuration, read once at startup from the environment
/// (after `dotenvy` has merged a `.env` file if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("STAYLIST_HOST").ok(),
            std::env::var("STAYLIST_PORT").ok(),
            std::env::var("STAYLIST_DATA_DIR").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>, data_dir: Option<String>) -> Result<Self> {
        let host = host
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .context("STAYLIST_HOST is not a valid IP address")?;

        let port = match port {
            Some(raw) => raw.parse::<u16>().context("STAYLIST_PORT is not a valid port")?,
            None => DEFAULT_PORT,
        };

        let data_dir = PathBuf::from(data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));

        Ok(Self { host, port, data_dir })
    }
}
