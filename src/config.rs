//! Configuration management for AstroGroot.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// arXiv category to ingest papers from.
    pub arxiv_category: String,
    /// YouTube channel id to ingest videos from.
    pub youtube_channel: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/.local/share/astrogroot (or the platform equivalent)
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("astrogroot");

        Self {
            data_dir,
            database_filename: "astrogroot.db".to_string(),
            user_agent: "AstroGroot/0.3 (astronomy content portal)".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            arxiv_category: "astro-ph".to_string(),
            youtube_channel: None,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the full path to the database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

/// Configuration file structure (`astrogroot.toml` in the data directory).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target directory for data.
    #[serde(default)]
    pub target: Option<String>,
    /// Database filename.
    #[serde(default)]
    pub database: Option<String>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// arXiv category for paper ingestion (e.g. "astro-ph", "astro-ph.GA").
    #[serde(default)]
    pub arxiv_category: Option<String>,
    /// YouTube channel id for video ingestion.
    #[serde(default)]
    pub youtube_channel: Option<String>,
}

impl Config {
    /// Load configuration from the standard location, falling back to
    /// defaults when no config file exists or it fails to parse.
    pub fn load() -> Self {
        let path = Settings::default().data_dir.join("astrogroot.toml");
        match fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref target) = self.target {
            let path = shellexpand::tilde(target);
            settings.data_dir = PathBuf::from(path.as_ref());
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref category) = self.arxiv_category {
            settings.arxiv_category = category.clone();
        }
        if let Some(ref channel) = self.youtube_channel {
            settings.youtube_channel = Some(channel.clone());
        }
    }
}

/// Load settings from configuration.
pub fn load_settings() -> Settings {
    let config = Config::load();
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
