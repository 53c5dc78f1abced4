use std::path::PathBuf;

use anyhow::Result;

/// Environment-driven server settings.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory uploaded photos are written to and served from.
    pub photos_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let photos_dir = std::env::var("PHOTOS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("photos"));

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            photos_dir,
            cors_allowed_origins,
        })
    }
}
