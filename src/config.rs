//! Process configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;

/// Server configuration.
///
/// Reads from environment variables (a `.env` file is loaded first when
/// present):
/// - `PORT` — listen port, required
/// - `HOST` — bind address (default: `0.0.0.0`)
/// - `RUST_LOG` — tracing filter directive (default: `info`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        // A missing .env file is the normal case in containers.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(Error::Config(format!(".env: {e}")));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so callers need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let port = lookup("PORT")
            .ok_or_else(|| Error::Config("PORT is not set".to_owned()))?;
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid PORT `{port}`: {e}")))?;

        let host = match lookup("HOST") {
            Some(h) => h
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| Error::Config(format!("invalid HOST `{h}`: {e}")))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_owned());

        Ok(Self { host, port, log_level })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
