use tracing::warn;

const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    // Record store
    pub api_base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub user_id: String,
    pub page_size: usize,

    // Analytics
    pub strategy_allowlist: Vec<String>,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            api_base_url: env("API_BASE_URL", "https://api.robodash.app"),
            api_key: env("API_KEY", ""),
            api_secret: env("API_SECRET", "").replace("\\n", "\n"),
            user_id: env("USER_ID", ""),
            page_size: env("PAGE_SIZE", "").parse().unwrap_or(DEFAULT_PAGE_SIZE),
            strategy_allowlist: load_allowlist(),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}

/// Load the recognized-strategy set from injected configuration: a JSON
/// array file named by ALLOWLIST_FILE wins over the STRATEGY_ALLOWLIST
/// comma list. An empty result deactivates the allowlist.
fn load_allowlist() -> Vec<String> {
    if let Ok(path) = std::env::var("ALLOWLIST_FILE") {
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<String>>(&content) {
                Ok(names) => return names,
                Err(e) => warn!("Ignoring allowlist file {}: {}", path, e),
            },
            Err(e) => warn!("Ignoring allowlist file {}: {}", path, e),
        }
    }

    std::env::var("STRATEGY_ALLOWLIST")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
