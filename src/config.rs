use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Delay before the canned assistant reply lands in the transcript.
    pub chat_reply_delay_ms: u64,
    /// Duration of the simulated data sync.
    pub sync_delay_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://dietdiary.db?mode=rwc".into());
        let chat_reply_delay_ms = std::env::var("CHAT_REPLY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1_000);
        let sync_delay_ms = std::env::var("SYNC_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2_000);
        Ok(Self {
            host,
            port,
            database_url,
            chat_reply_delay_ms,
            sync_delay_ms,
        })
    }
}
