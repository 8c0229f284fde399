/// Basic-auth credentials for Unity Connection servers.
pub mod auth;
/// CUPI entity mapping, transports and the connection server client.
pub mod cupi;

/// Logging verbosity for SDK operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit verbose debug output (urls, request bodies, paging progress).
    Debug,
    /// Emit standard informational output.
    Information,
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}
