// src/aggregator.rs
use crate::models::server::{LiveServer, PlayerCount, RegistryServer, RobloxServer};
use crate::upstream::UpstreamClient;
use crate::utils::{local_time_string, now_millis, FetchError};
use indexmap::IndexMap;
use log::{debug, warn};

#[derive(Debug, Clone)]
struct JobInfo {
    name: Option<String>,
    place_id: String,
}

/// Registry jobs keyed by job id, in order of first appearance.
#[derive(Debug, Default)]
pub struct JobIndex {
    jobs: IndexMap<String, JobInfo>,
}

impl JobIndex {
    /// Later entries for the same job id replace earlier ones but keep its position.
    pub fn from_registry(entries: Vec<RegistryServer>) -> Self {
        let mut jobs = IndexMap::new();
        for entry in entries {
            let (Some(job_id), Some(place_id)) = (entry.job_id, entry.place_id) else {
                continue;
            };
            jobs.insert(job_id, JobInfo { name: entry.name, place_id });
        }
        Self { jobs }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn name(&self, job_id: &str) -> Option<&str> {
        self.jobs.get(job_id).and_then(|info| info.name.as_deref())
    }

    /// Job ids grouped under their place id; places come in the order their
    /// first job was indexed.
    pub fn by_place(&self) -> IndexMap<&str, Vec<&str>> {
        let mut places: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (job_id, info) in &self.jobs {
            places
                .entry(info.place_id.as_str())
                .or_default()
                .push(job_id.as_str());
        }
        places
    }
}

pub struct Aggregator {
    client: UpstreamClient,
}

impl Aggregator {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Registry jobs that Roblox currently lists, capped at the configured
    /// maximum. Never fails: any upstream problem yields fewer (or zero) records.
    pub async fn live_servers(&self) -> Vec<LiveServer> {
        match self.try_live_servers().await {
            Ok(servers) => servers,
            Err(e) => {
                warn!("Registry unavailable, serving empty list: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_live_servers(&self) -> Result<Vec<LiveServer>, FetchError> {
        let config = self.client.config();
        let index = JobIndex::from_registry(self.client.fetch_registry().await?);
        if index.is_empty() {
            debug!("Registry returned no usable jobs");
            return Ok(Vec::new());
        }

        let places = index.by_place();
        debug!("Indexed {} jobs across {} places", index.len(), places.len());

        let mut live = Vec::new();
        // One place at a time, each awaited before the next.
        for (place_id, job_ids) in &places {
            let servers = match self.client.fetch_place_servers(place_id).await {
                Ok(servers) => servers,
                Err(e) => {
                    warn!("Skipping place {}: {}", place_id, e);
                    continue;
                }
            };

            for server in servers {
                if let Some(record) = self.match_server(&index, place_id, job_ids, server) {
                    live.push(record);
                }
            }
        }

        live.truncate(config.max_results);
        Ok(live)
    }

    fn match_server(
        &self,
        index: &JobIndex,
        place_id: &str,
        job_ids: &[&str],
        server: RobloxServer,
    ) -> Option<LiveServer> {
        let config = self.client.config();
        let job_id = server.id?;
        if !job_ids.contains(&job_id.as_str()) {
            return None;
        }

        // A zero cap is treated as absent.
        let max = server
            .max_players
            .filter(|&max| max > 0)
            .unwrap_or(config.default_max_players);

        Some(LiveServer {
            timestamp: local_time_string(),
            name: index.name(&job_id).unwrap_or("Unknown").to_string(),
            place_id: place_id.to_string(),
            link: config.join_link(place_id, &job_id),
            players: PlayerCount {
                playing: server.playing.unwrap_or(0),
                max,
            },
            created: now_millis(),
            job_id,
        })
    }
}
