use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Connection details for the live tests, read from `secrets.json`.
#[derive(Debug, Deserialize)]
pub struct Secrets {
    pub server_name: String,
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Alias of an existing user the read-only tests can look up.
    pub sample_user_alias: String,
}

pub fn load_secrets() -> Result<Secrets, String> {
    let mut path = std::env::current_dir().map_err(|e| e.to_string())?;
    path.push("secrets.json");
    read_secrets(&path)
}

fn read_secrets(path: &PathBuf) -> Result<Secrets, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read secrets.json: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid secrets.json: {e}"))
}
