//! HTTP server configuration object.

use std::net::SocketAddr;

use daily_diet::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            cookie_secure,
            bind_addr,
            db_pool: None,
        }
    }

    /// Use Diesel repositories backed by `pool` instead of in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
