use std::sync::Arc;

use service::{
    errors::ServiceError,
    file::{channel_allowlist::ChannelAllowlist, vouch_ledger::VouchLedger},
    stores::{ChannelStore, VouchStore},
};

use crate::commands::GatePolicy;

/// Everything a command handler needs. Cloned into the event handler.
#[derive(Clone)]
pub struct BotState {
    pub vouches: Arc<dyn VouchStore>,
    pub channels: Arc<dyn ChannelStore>,
    pub gate: GatePolicy,
    pub top_limit: usize,
}

impl BotState {
    /// Open both file-backed stores at the configured paths.
    pub async fn open(cfg: &configs::AppConfig) -> Result<Self, ServiceError> {
        let vouches = VouchLedger::new(cfg.vouches_path()).await?;
        let channels = ChannelAllowlist::new(cfg.channels_path()).await?;
        Ok(Self {
            vouches,
            channels,
            gate: GatePolicy::from_config(cfg.commands.gate_all_commands),
            top_limit: cfg.commands.top_limit,
        })
    }
}
