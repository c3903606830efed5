use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com/v1";
pub const DEFAULT_LINK_DESCRIPTION: &str = "Registration Fee";
pub const CONFIG_PATHS: [&str; 2] = ["/etc/paylink/paylink.toml", "./paylink.toml"];

#[derive(Clone, Deserialize)]
pub struct PaylinkConfig {
    #[serde(default)]
    pub razorpay_key_id: Option<String>,
    #[serde(default)]
    pub razorpay_secret: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_base")]
    pub razorpay_api_base: String,
    #[serde(default)]
    pub razorpay_timeout_secs: Option<u64>,
    #[serde(default = "default_app_title")]
    pub app_title: String,
    #[serde(default = "default_app_version")]
    pub app_version: String,
    #[serde(default = "default_link_description")]
    pub link_description: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_app_title() -> String {
    "MyApp".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_link_description() -> String {
    DEFAULT_LINK_DESCRIPTION.to_string()
}

impl PaylinkConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&CONFIG_PATHS, |key| std::env::var(key).ok())
    }

    /// The first readable file wins; the lookup is only consulted when none exists.
    pub fn load_from<P, F>(paths: &[P], lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        for path in paths {
            let path = path.as_ref();
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path.display());
                return Ok(toml::from_str(&contents)?);
            }
        }

        tracing::info!("Loading config from environment");
        Ok(Self::from_lookup(lookup))
    }

    /// Builds the config from an environment-like lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let razorpay_timeout_secs = get("RAZORPAY_TIMEOUT_SECS").and_then(|raw| {
            raw.parse()
                .map_err(|_| {
                    tracing::warn!("Ignoring invalid RAZORPAY_TIMEOUT_SECS value {:?}", raw);
                })
                .ok()
        });

        Self {
            razorpay_key_id: get("RAZORPAY_KEY_ID"),
            razorpay_secret: get("RAZORPAY_SECRET"),
            port,
            razorpay_api_base: get("RAZORPAY_API_BASE").unwrap_or_else(default_api_base),
            razorpay_timeout_secs,
            app_title: get("APP_TITLE").unwrap_or_else(default_app_title),
            app_version: get("APP_VERSION").unwrap_or_else(default_app_version),
            link_description: get("LINK_DESCRIPTION").unwrap_or_else(default_link_description),
        }
    }
}
