// src/models/server.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One entry of the brainrot registry listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryServer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_id: Option<String>,
    /// The registry calls the place id `serverId`.
    #[serde(default, rename = "serverId", deserialize_with = "lenient_text")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobloxServer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub playing: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub max_players: Option<u32>,
}

/// Entries are kept raw so one malformed server cannot sink the whole page.
#[derive(Debug, Deserialize)]
pub struct RobloxServerPage {
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
}

/// Occupancy of one server, rendered as `playing/max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount {
    pub playing: u32,
    pub max: u32,
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.playing, self.max)
    }
}

impl Serialize for PlayerCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A registry job that Roblox currently reports as running.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveServer {
    pub timestamp: String,
    pub name: String,
    pub place_id: String,
    pub job_id: String,
    pub players: PlayerCount,
    pub link: String,
    pub created: i64,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct LiveStats {
    pub total_servers: usize,
    pub total_players: u64,
    pub total_capacity: u64,
}

impl LiveStats {
    pub fn from_servers(servers: &[LiveServer]) -> Self {
        servers.iter().fold(Self::default(), |mut stats, server| {
            stats.total_servers += 1;
            stats.total_players += u64::from(server.players.playing);
            stats.total_capacity += u64::from(server.players.max);
            stats
        })
    }
}

// Ids and names show up as strings from most sources but the registry is not strict about it.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// Any non-negative number or numeric string; everything else reads as missing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}
