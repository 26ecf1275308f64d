// src/upstream.rs
use crate::config::Config;
use crate::models::server::{RegistryServer, RobloxServer, RobloxServerPage};
use crate::utils::FetchError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, USER_AGENT};
use serde::de::DeserializeOwned;

/// HTTP access to the brainrot registry and the Roblox public server listing.
pub struct UpstreamClient {
    http: reqwest::Client,
    config: Config,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

impl UpstreamClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(config.upstream_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.bytes().await?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(serde_json::from_slice(&body)?)
    }

    /// Registry listing. A `null` body counts as empty; entries that are not
    /// objects are dropped rather than failing the whole listing.
    pub async fn fetch_registry(&self) -> Result<Vec<RegistryServer>, FetchError> {
        let entries: Option<Vec<serde_json::Value>> =
            self.get_json(&self.config.registry_url, &[]).await?;

        Ok(entries
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }

    pub async fn fetch_place_servers(&self, place_id: &str) -> Result<Vec<RobloxServer>, FetchError> {
        let url = self.config.place_servers_url(place_id);
        let query = [
            ("sortOrder", "Asc".to_string()),
            ("limit", self.config.roblox_page_limit.to_string()),
        ];
        let page: Option<RobloxServerPage> = self.get_json(&url, &query).await?;
        Ok(page
            .and_then(|p| p.data)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> UpstreamClient {
        let config = Config {
            registry_url: format!("{}/brainrots", server.uri()),
            roblox_api_base: server.uri(),
            ..Config::default()
        };
        UpstreamClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn registry_request_carries_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brainrots"))
            .and(header("user-agent", "Mozilla/5.0"))
            .and(header("accept", "application/json"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "jobId": "A", "serverId": "P1", "name": "N1" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let entries = client_for(&server).fetch_registry().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].job_id.as_deref(), Some("A"));
        assert_eq!(entries[0].place_id.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn registry_null_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brainrots"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let entries = client_for(&server).fetch_registry().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn registry_object_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brainrots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "down" })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_registry().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn registry_skips_non_object_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brainrots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                "garbage",
                42,
                { "jobId": "A", "serverId": "P1", "name": "N1" }
            ])))
            .mount(&server)
            .await;

        let entries = client_for(&server).fetch_registry().await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn place_servers_query_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/games/P1/servers/Public"))
            .and(query_param("sortOrder", "Asc"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "previousPageCursor": null,
                "nextPageCursor": "abc",
                "data": [{ "id": "A", "playing": 3, "maxPlayers": 10, "ping": 80 }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/games/P2/servers/Public"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let servers = client.fetch_place_servers("P1").await.unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].id.as_deref(), Some("A"));
        assert_eq!(servers[0].playing, Some(3));
        assert_eq!(servers[0].max_players, Some(10));

        let err = client.fetch_place_servers("P2").await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 429));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brainrots"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = Config {
            registry_url: format!("{}/brainrots", server.uri()),
            upstream_timeout_ms: 50,
            ..Config::default()
        };
        let err = UpstreamClient::new(config)
            .unwrap()
            .fetch_registry()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref e) if e.is_timeout()));
    }
}
