//! Process configuration, read from the environment at startup.

use std::path::PathBuf;

/// Runtime settings for the API process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind: String,
    /// Root of all durable state; credentials and documents live beneath it.
    pub data_dir: PathBuf,
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind = std::env::var("OFICINA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let data_dir = std::env::var("OFICINA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            bind,
            data_dir,
            jwt_secret,
        }
    }

    /// The credential store's backing file.
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Directory holding one document file per user id.
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("user_data")
    }
}
