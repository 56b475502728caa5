use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use time::OffsetDateTime;

use crate::chat::service::ChatTranscript;
use crate::config::AppConfig;
use crate::diary::service::MealLedger;
use crate::dishes::service::DishStore;
use crate::import::service::DietImporter;
use crate::shopping::service::ShoppingBoard;
use crate::storage::{KvStore, SqliteKv};

/// Shared handles to the per-feature controllers. Handlers read state and
/// issue commands through these; they never hold feature state of their own.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ledger: Arc<MealLedger>,
    pub shopping: Arc<ShoppingBoard>,
    pub dishes: Arc<DishStore>,
    pub chat: Arc<ChatTranscript>,
    pub importer: Arc<DietImporter>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await
            .context("open sqlite database")?;
        let kv = Arc::new(SqliteKv::new(pool).await?) as Arc<dyn KvStore>;

        Self::from_parts(config, kv).await
    }

    pub async fn from_parts(
        config: Arc<AppConfig>,
        kv: Arc<dyn KvStore>,
    ) -> anyhow::Result<Self> {
        let ledger = Arc::new(MealLedger::new(Duration::from_millis(config.sync_delay_ms)));
        ledger.seed_sample_day(OffsetDateTime::now_utc().date());

        let shopping = Arc::new(ShoppingBoard::new());
        shopping.seed_sample_data();

        let dishes = Arc::new(DishStore::new(Arc::clone(&kv)));
        dishes.load().await;

        let chat = Arc::new(ChatTranscript::new(Duration::from_millis(
            config.chat_reply_delay_ms,
        )));

        let importer = Arc::new(DietImporter::new(
            Arc::clone(&ledger),
            Arc::clone(&shopping),
        ));

        Ok(Self {
            config,
            ledger,
            shopping,
            dishes,
            chat,
            importer,
        })
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        use crate::storage::MemoryKv;

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "sqlite::memory:".into(),
            chat_reply_delay_ms: 10,
            sync_delay_ms: 10,
        });
        Self::from_parts(config, Arc::new(MemoryKv::default()))
            .await
            .expect("fake state")
    }
}
