use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::pipeline::strategy::TierOrder;

/// Application-level constants
pub const APP_NAME: &str = "Verse Study";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default scripture API endpoint (api.bible v1 layout).
pub const DEFAULT_BIBLE_API_BASE: &str = "https://api.scripture.api.bible/v1";

/// Darby (FR) edition, used when `BIBLE_ID` is not set.
pub const DEFAULT_BIBLE_ID: &str = "a93a92589195411f-01";

/// Default log filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "verse_study_lib=info,verse_study=info,tower_http=info"
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub bible_api_base: String,
    pub bible_api_key: Option<String>,
    /// Preferred edition id. `None` → discover by language.
    pub bible_id: Option<String>,
    pub bible_language: String,
    pub ollama_url: String,
    /// Generative tier is disabled when no model is configured.
    pub ollama_model: Option<String>,
    pub llm_timeout_secs: u64,
    pub tier_order: TierOrder,
    pub curated_library_path: Option<String>,
    pub fallback_verse_ceiling: u32,
    /// Longest explicit range served before clamping to the chapter.
    pub max_range_verses: u32,
    pub max_concurrency: usize,
    pub budget_floor: usize,
    pub budget_ceiling: usize,
    pub default_target_chars: usize,
    /// Empty → any origin allowed.
    pub allowed_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000),
            bible_api_base: DEFAULT_BIBLE_API_BASE.to_string(),
            bible_api_key: None,
            bible_id: Some(DEFAULT_BIBLE_ID.to_string()),
            bible_language: "fra".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: None,
            llm_timeout_secs: 30,
            tier_order: TierOrder::CuratedFirst,
            curated_library_path: None,
            fallback_verse_ceiling: 31,
            max_range_verses: 176,
            max_concurrency: 4,
            budget_floor: 60,
            budget_ceiling: 600,
            default_target_chars: 1500,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let host: IpAddr = parse_or(get("HOST"), "HOST", defaults.bind_addr.ip());
        let port: u16 = parse_or(get("PORT"), "PORT", defaults.bind_addr.port());

        let floor = parse_or(get("BUDGET_FLOOR"), "BUDGET_FLOOR", defaults.budget_floor);
        let mut ceiling = parse_or(get("BUDGET_CEILING"), "BUDGET_CEILING", defaults.budget_ceiling);
        if ceiling < floor {
            tracing::warn!(floor, ceiling, "BUDGET_CEILING below BUDGET_FLOOR, using floor");
            ceiling = floor;
        }

        Self {
            bind_addr: SocketAddr::new(host, port),
            bible_api_base: get("BIBLE_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.bible_api_base),
            bible_api_key: get("BIBLE_API_KEY"),
            bible_id: get("BIBLE_ID").or(defaults.bible_id),
            bible_language: get("BIBLE_LANGUAGE").unwrap_or(defaults.bible_language),
            ollama_url: get("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            ollama_model: get("OLLAMA_MODEL"),
            llm_timeout_secs: parse_or(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", defaults.llm_timeout_secs),
            tier_order: parse_or(get("TIER_ORDER"), "TIER_ORDER", defaults.tier_order),
            curated_library_path: get("CURATED_LIBRARY_PATH"),
            fallback_verse_ceiling: parse_or(
                get("FALLBACK_VERSE_CEILING"),
                "FALLBACK_VERSE_CEILING",
                defaults.fallback_verse_ceiling,
            )
            .max(1),
            max_range_verses: parse_or(get("MAX_RANGE_VERSES"), "MAX_RANGE_VERSES", defaults.max_range_verses)
                .max(1),
            max_concurrency: parse_or(get("MAX_CONCURRENCY"), "MAX_CONCURRENCY", defaults.max_concurrency)
                .max(1),
            budget_floor: floor,
            budget_ceiling: ceiling,
            default_target_chars: parse_or(
                get("DEFAULT_TARGET_CHARS"),
                "DEFAULT_TARGET_CHARS",
                defaults.default_target_chars,
            ),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Whether a generative model is configured.
    pub fn generative_enabled(&self) -> bool {
        self.ollama_model.is_some()
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(key, value, "Invalid configuration value, using default");
                default
            }
        },
        None => default,
    }
}
