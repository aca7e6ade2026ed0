use configs::AppConfig;
use serenity::Client;
use tracing::info;

use service::runtime;

use crate::discord::{self, Handler};
use crate::errors::BotError;
use crate::state::BotState;

/// Load and validate configuration (`CONFIG_PATH`, `.env`, `DISCORD_TOKEN`).
pub fn load_config() -> Result<AppConfig, BotError> {
    AppConfig::load_and_validate().map_err(|e| BotError::InvalidConfig(e.to_string()))
}

/// Public entry: open the stores, connect to the gateway and serve until the
/// connection ends.
pub async fn run(cfg: AppConfig) -> Result<(), BotError> {
    runtime::ensure_env(&cfg.storage.data_dir).await?;

    // A corrupt store file stops startup here.
    let state = BotState::open(&cfg).await?;
    info!(
        vouches = %cfg.vouches_path().display(),
        channels = %cfg.channels_path().display(),
        gate = ?state.gate,
        top_limit = state.top_limit,
        "stores opened"
    );

    let mut client = Client::builder(&cfg.bot.token, discord::intents())
        .event_handler(Handler::new(state))
        .await?;

    info!("connecting to gateway");
    client.start().await?;
    Ok(())
}
