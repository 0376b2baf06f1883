use std::path::PathBuf;

use chrono::Utc;

use crate::{config::SpotifyConfig, spotify, types::Token};

/// Holds the Spotify token and keeps it fresh across a run.
pub struct TokenManager {
    token: Token,
    client_id: String,
    token_url: String,
}

impl TokenManager {
    pub fn new(token: Token, config: &SpotifyConfig) -> Self {
        TokenManager {
            token,
            client_id: config.client_id.clone(),
            token_url: config.token_url.clone(),
        }
    }

    pub async fn load(config: &SpotifyConfig) -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(token, config))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let new_token =
                spotify::auth::refresh_token(&self.token_url, &self.client_id, &self.token)
                    .await?;
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    /// True once fewer than four minutes of validity remain.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (self.token.obtained_at + self.token.expires_in).saturating_sub(240)
    }

    /// True if every scope in `scopes` was granted to the cached token.
    pub fn covers_scopes(&self, scopes: &[&str]) -> bool {
        let granted: Vec<&str> = self.token.scope.split_whitespace().collect();
        scopes.iter().all(|s| granted.contains(s))
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lastsync/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
