use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::config::Config;
use crate::models::RawTradeRecord;
use crate::store::RecordStore;

const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);
const MAX_FETCH_ATTEMPTS: usize = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct JwtClaims {
    sub: String,
    iss: String,
    nbf: u64,
    exp: u64,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<RawTradeRecord>,
}

/// Client for the hosted record store. Pages are fetched with a short-lived
/// ES256 JWT per request; transient failures are retried here a bounded
/// number of times, then surfaced unchanged rather than as an empty page.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    last_request: Option<Instant>,
}

impl RemoteStore {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
            last_request: None,
        }
    }

    fn generate_jwt(&self, method: &str, path: &str) -> Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let host = self
            .base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let uri = format!("{} {}{}", method, host, path);

        let claims = JwtClaims {
            sub: self.api_key.clone(),
            iss: "robo-analytics".to_string(),
            nbf: now,
            exp: now + 120,
            uri,
        };

        // The secret is a PEM-encoded EC private key
        let key = EncodingKey::from_ec_pem(self.api_secret.as_bytes())
            .context("Failed to parse API secret as EC key")?;

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.api_key.clone());
        header.typ = Some("JWT".to_string());

        encode(&header, &claims, &key).context("Failed to encode JWT")
    }

    async fn rate_limit(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    async fn request_page(
        &mut self,
        user_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawTradeRecord>> {
        self.rate_limit().await;

        let path = format!("/api/v1/users/{}/trades", user_id);
        let jwt = self.generate_jwt("GET", &path)?;

        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("offset", offset.to_string()), ("limit", limit.to_string())])
            .header("Authorization", format!("Bearer {}", jwt))
            .send()
            .await
            .context("Failed to fetch trade records")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Record store error {}: {}", status, body);
        }

        let data: RecordsResponse = resp
            .json()
            .await
            .context("Failed to parse record page response")?;

        Ok(data.records)
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn fetch_page(
        &mut self,
        user_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawTradeRecord>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.request_page(user_id, offset, limit).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < MAX_FETCH_ATTEMPTS => {
                    warn!(
                        "Fetch attempt {}/{} at offset {} failed: {}",
                        attempt, MAX_FETCH_ATTEMPTS, offset, e
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("store fetch failed after {} attempts", attempt)
                    });
                }
            }
        }
    }
}
