use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    // Listener
    pub bind_address: String,
    pub port: u16,

    // Upstreams
    pub registry_url: String,
    pub roblox_api_base: String,
    pub roblox_web_base: String,
    pub game_slug: String,
    pub upstream_timeout_ms: u64,
    pub roblox_page_limit: u32,

    // Output shaping
    pub default_max_players: u32,
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            registry_url: "https://brainrotss.up.railway.app/brainrots".to_string(),
            roblox_api_base: "https://games.roblox.com".to_string(),
            roblox_web_base: "https://www.roblox.com".to_string(),
            game_slug: "Steal-a-Brainrot".to_string(),
            upstream_timeout_ms: 1000,
            roblox_page_limit: 100,
            default_max_players: 8,
            max_results: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("BIND_ADDRESS", defaults.bind_address),
            port: env_or("PORT", defaults.port),
            registry_url: env_or("BACKEND_URL", defaults.registry_url),
            roblox_api_base: env_or("ROBLOX_API_BASE", defaults.roblox_api_base),
            roblox_web_base: env_or("ROBLOX_WEB_BASE", defaults.roblox_web_base),
            game_slug: env_or("GAME_SLUG", defaults.game_slug),
            upstream_timeout_ms: env_or("UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout_ms),
            roblox_page_limit: env_or("ROBLOX_PAGE_LIMIT", defaults.roblox_page_limit),
            default_max_players: env_or("MAX_PLAYERS", defaults.default_max_players),
            max_results: env_or("MAX_RESULTS", defaults.max_results),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Public server listing for one place, without the query string.
    pub fn place_servers_url(&self, place_id: &str) -> String {
        format!(
            "{}/v1/games/{}/servers/Public",
            self.roblox_api_base.trim_end_matches('/'),
            place_id
        )
    }

    pub fn join_link(&self, place_id: &str, job_id: &str) -> String {
        format!(
            "{}/games/{}/{}?serverJobId={}",
            self.roblox_web_base.trim_end_matches('/'),
            place_id,
            self.game_slug,
            job_id
        )
    }
}
