use std::net::SocketAddr;

/// Runtime settings of the GraphQL service.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
    /// Path serving both GraphQL requests (POST) and the explorer (GET).
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 5000)),
            endpoint: "/graphQL".into(),
        }
    }
}
