use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use records_core::weather::DEFAULT_BASE_URL;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines for local development.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Command-line and environment configuration for the server.
#[derive(Debug, Clone, Parser)]
#[command(name = "mock-server", about = "Mock data and weather passthrough API")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Credential for the weather provider. Weather routes answer 500 when
    /// it is empty.
    #[arg(long, env = "OPENWEATHER_API_KEY", default_value = "", hide_env_values = true)]
    pub weather_api_key: String,

    /// Base URL of the weather provider API.
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub weather_base_url: String,

    /// Per-request timeout for provider calls, in seconds.
    #[arg(
        long,
        env = "WEATHER_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=120)
    )]
    pub weather_timeout_secs: u64,

    /// Log line format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            weather_api_key: String::new(),
            weather_base_url: DEFAULT_BASE_URL.to_string(),
            weather_timeout_secs: 10,
            log_format: LogFormat::Pretty,
        }
    }
}
