//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Directory for the on-disk store. `None` runs in memory.
    pub data_dir: Option<PathBuf>,
    /// Whether destructive development routes answer requests.
    pub dev_routes: bool,
}

impl ServerConfig {
    /// Creates a new server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            data_dir: None,
            dev_routes: false,
        }
    }

    /// Sets the store directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Enables or disables the development routes.
    #[must_use]
    pub fn with_dev_routes(mut self, enabled: bool) -> Self {
        self.dev_routes = enabled;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 3000)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.data_dir, None);
        assert!(!config.dev_routes);
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new("0.0.0.0:9000".parse().unwrap())
            .with_data_dir("/tmp/arbordb")
            .with_dev_routes(true);

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/arbordb")));
        assert!(config.dev_routes);
    }
}
