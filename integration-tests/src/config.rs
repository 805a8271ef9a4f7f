use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pbix_publisher::auth::credentials::DEFAULT_AUTHORITY;
use pbix_publisher::auth::token::TokenProvider;
use pbix_publisher::config::Settings;
use pbix_publisher::powerbi::importclient::DEFAULT_API_URL;
use pbix_publisher::LogLevel;

#[derive(Debug, Deserialize)]
pub struct Secrets {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub tenant_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub workspace_id: String,
    pub pbix_file_path: PathBuf,
    pub dataset_name: Option<String>,
}

impl Secrets {
    pub fn into_settings(self) -> Result<Settings, String> {
        let provider = match (self.username, self.password) {
            (Some(username), Some(password)) => TokenProvider::ResourceOwnerPassword {
                client_id: self.client_id,
                client_secret: self.client_secret,
                tenant_id: self.tenant_id,
                username,
                password,
            },
            (None, None) => TokenProvider::ClientCredentials {
                client_id: self.client_id,
                client_secret: self
                    .client_secret
                    .ok_or("secrets.json needs client_secret for client credentials")?,
                tenant_id: self.tenant_id,
            },
            _ => return Err("secrets.json needs both username and password".to_string()),
        };

        Ok(Settings {
            provider,
            workspace_id: self.workspace_id,
            pbix_file_path: self.pbix_file_path,
            dataset_name: self.dataset_name,
            api_url: DEFAULT_API_URL.to_string(),
            authority_url: DEFAULT_AUTHORITY.to_string(),
            log_level: LogLevel::Debug,
        })
    }
}

/// `Ok(None)` when no secrets.json exists in the working directory.
pub fn load_secrets() -> Result<Option<Secrets>, String> {
    let mut path = std::env::current_dir().map_err(|e| e.to_string())?;
    path.push("secrets.json");
    if !path.exists() {
        return Ok(None);
    }
    read_secrets(&path).map(Some)
}

fn read_secrets(path: &Path) -> Result<Secrets, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read secrets.json: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid secrets.json: {e}"))
}
