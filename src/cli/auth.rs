use crate::{config::SpotifyConfig, error, spotify};

pub async fn auth() {
    let config = match SpotifyConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = spotify::auth::authorize(&config).await {
        error!("{}", e);
    }
}
