//! Supabase REST client (browser only)
//!
//! Endpoint and anon key are baked in at build time from
//! `MELLO_SUPABASE_URL` and `MELLO_SUPABASE_ANON_KEY`. Without them
//! [`RemoteLeaderboard::from_env`] returns `None` and submissions are dropped
//! with a warning.

use anyhow::{Context, Result, anyhow};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::{Leaderboard, LeaderboardEntry, LeaderboardQuery, StoredRow, TABLE};

#[derive(Debug, Clone)]
pub struct RemoteLeaderboard {
    base_url: String,
    anon_key: String,
}

impl RemoteLeaderboard {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Client for the endpoint compiled into this build
    pub fn from_env() -> Option<Self> {
        match (option_env!("MELLO_SUPABASE_URL"), option_env!("MELLO_SUPABASE_ANON_KEY")) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some(Self::new(url, key)),
            _ => {
                log::warn!("Leaderboard endpoint not configured for this build");
                None
            }
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn headers(&self) -> Result<Headers> {
        let headers = Headers::new().map_err(|e| anyhow!("{:?}", e))?;
        let bearer = format!("Bearer {}", self.anon_key);
        for (name, value) in [
            ("apikey", self.anon_key.as_str()),
            ("Authorization", bearer.as_str()),
            ("Content-Type", "application/json"),
        ] {
            headers.set(name, value).map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(headers)
    }

    async fn send(&self, url: &str, init: &RequestInit) -> Result<Response> {
        let request = Request::new_with_str_and_init(url, init).map_err(|e| anyhow!("{:?}", e))?;
        let window = web_sys::window().context("no window")?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| anyhow!("fetch failed: {:?}", e))?;
        let response: Response = value.dyn_into().map_err(|_| anyhow!("fetch did not return a Response"))?;
        if !response.ok() {
            return Err(anyhow!("store answered {} {}", response.status(), response.status_text()));
        }
        Ok(response)
    }

    /// Insert one row
    pub async fn insert(&self, entry: &LeaderboardEntry) -> Result<()> {
        let body = serde_json::to_string(&[entry.to_row()]).context("encoding leaderboard row")?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&self.headers()?);
        init.set_body(&wasm_bindgen::JsValue::from_str(&body));
        self.send(&self.table_url(), &init).await?;
        Ok(())
    }

    /// Top rows for a query, skipping rows of unknown games
    pub async fn fetch_top(&self, query: LeaderboardQuery) -> Result<Vec<LeaderboardEntry>> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&self.headers()?);
        let url = format!("{}?{}", self.table_url(), query.to_query_string());
        let response = self.send(&url, &init).await?;

        let text = JsFuture::from(response.text().map_err(|e| anyhow!("{:?}", e))?)
            .await
            .map_err(|e| anyhow!("reading body failed: {:?}", e))?
            .as_string()
            .context("body is not text")?;
        let rows: Vec<StoredRow> = serde_json::from_str(&text).context("decoding leaderboard rows")?;
        Ok(rows.into_iter().filter_map(StoredRow::into_entry).collect())
    }
}

impl Leaderboard for RemoteLeaderboard {
    fn submit(&mut self, entry: LeaderboardEntry) {
        let client = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match client.insert(&entry).await {
                Ok(()) => log::info!("Saved {} score {} to the hall of fame", entry.game, entry.score),
                Err(e) => log::error!("Could not save score to the hall of fame: {:#}", e),
            }
        });
    }
}
