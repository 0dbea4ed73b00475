use secrecy::Secret;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use validator::Validate;

/// Fixed namespace holding all media objects.
pub const DEFAULT_CONTAINER: &str = "media";

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    #[validate(custom = "validate_ip_addr")]
    pub bind_address: String,
    #[validate(range(min = 1024, max = 65535))]
    #[serde(default = "default_port")]
    pub port: u16,
    /// Credential/endpoint string for the blob store. Left unset, every
    /// storage-backed operation answers with a configuration fault.
    pub storage_connection_string: Option<Secret<String>>,
    #[serde(default = "default_container")]
    pub media_container: String,
}

impl Settings {
    /// Load settings from environment variables (`BIND_ADDRESS`, `PORT`,
    /// `STORAGE_CONNECTION_STRING`, `MEDIA_CONTAINER`).
    pub fn load() -> Result<Self, envy::Error> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        envy::from_env()
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self.bind_address.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            storage_connection_string: None,
            media_container: default_container(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

fn validate_ip_addr(addr: &str) -> Result<(), validator::ValidationError> {
    addr.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_bind_address"))
}
