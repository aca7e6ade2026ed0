//! Command layer: validation, permission and channel checks, store effects.
//!
//! Nothing in here knows about the chat platform. The adapter in
//! [`crate::discord`] turns interactions into [`Command`] + [`CommandContext`]
//! and renders the returned [`Reply`].

pub mod channels;
pub mod reply;
pub mod vouch;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use service::errors::ServiceError;

use crate::errors::CommandParseError;
use crate::state::BotState;
pub use reply::{Embed, EmbedField, Reply};

pub const CHANNEL_NOT_ALLOWED: &str = "❌ This channel is not allowed for bot commands.";
pub const ADMIN_ONLY: &str = "Only admins can use this command.";
pub const GUILD_ONLY: &str = "This command can only be used in a server.";

/// Who invoked a command, and where.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub user_id: u64,
    pub is_admin: bool,
    pub invoked_at: DateTime<Utc>,
}

/// A resolved member argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMember {
    pub id: u64,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Option value as delivered by the platform, already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    User(TargetMember),
    Integer(i64),
    String(String),
    Channel(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Vouch { member: TargetMember, stars: i64, details: String },
    Vouches { member: TargetMember },
    AddVouches { member: TargetMember, amount: i64 },
    DeleteVouches { member: TargetMember, amount: i64 },
    TopVouched,
    SetChannel { channel_id: u64 },
    RemoveSetChannel { channel_id: u64 },
}

/// Which commands the allowed-channel gate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePolicy {
    /// Only `vouch` is gated.
    #[default]
    VouchOnly,
    /// Everything except the allowlist management commands.
    AllCommands,
}

impl GatePolicy {
    pub fn from_config(gate_all_commands: bool) -> Self {
        if gate_all_commands { GatePolicy::AllCommands } else { GatePolicy::VouchOnly }
    }
}

pub const COMMAND_NAMES: [&str; 7] = [
    "vouch",
    "vouches",
    "delete_vouches",
    "add_vouches",
    "top_vouched",
    "set_channel",
    "remove_set_channel",
];

struct Options(Vec<(String, OptionValue)>);

impl Options {
    fn take(&mut self, name: &'static str) -> Result<OptionValue, CommandParseError> {
        let pos = self
            .0
            .iter()
            .position(|(n, _)| n == name)
            .ok_or(CommandParseError::MissingOption(name))?;
        Ok(self.0.swap_remove(pos).1)
    }

    fn member(&mut self, name: &'static str) -> Result<TargetMember, CommandParseError> {
        match self.take(name)? {
            OptionValue::User(m) => Ok(m),
            _ => Err(CommandParseError::WrongType(name)),
        }
    }

    fn integer(&mut self, name: &'static str) -> Result<i64, CommandParseError> {
        match self.take(name)? {
            OptionValue::Integer(i) => Ok(i),
            _ => Err(CommandParseError::WrongType(name)),
        }
    }

    fn string(&mut self, name: &'static str) -> Result<String, CommandParseError> {
        match self.take(name)? {
            OptionValue::String(s) => Ok(s),
            _ => Err(CommandParseError::WrongType(name)),
        }
    }

    fn channel(&mut self, name: &'static str) -> Result<u64, CommandParseError> {
        match self.take(name)? {
            OptionValue::Channel(c) => Ok(c),
            _ => Err(CommandParseError::WrongType(name)),
        }
    }
}

impl Command {
    /// Build a command from its registered name and resolved options.
    pub fn from_options(name: &str, options: Vec<(String, OptionValue)>) -> Result<Self, CommandParseError> {
        let mut opts = Options(options);
        let cmd = match name {
            "vouch" => Command::Vouch {
                member: opts.member("member")?,
                stars: opts.integer("stars")?,
                details: opts.string("details")?,
            },
            "vouches" => Command::Vouches { member: opts.member("member")? },
            "add_vouches" => {
                Command::AddVouches { member: opts.member("member")?, amount: opts.integer("amount")? }
            }
            "delete_vouches" => {
                Command::DeleteVouches { member: opts.member("member")?, amount: opts.integer("amount")? }
            }
            "top_vouched" => Command::TopVouched,
            "set_channel" => Command::SetChannel { channel_id: opts.channel("channel")? },
            "remove_set_channel" => Command::RemoveSetChannel { channel_id: opts.channel("channel")? },
            other => return Err(CommandParseError::UnknownCommand(other.to_string())),
        };
        Ok(cmd)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Vouch { .. } => "vouch",
            Command::Vouches { .. } => "vouches",
            Command::AddVouches { .. } => "add_vouches",
            Command::DeleteVouches { .. } => "delete_vouches",
            Command::TopVouched => "top_vouched",
            Command::SetChannel { .. } => "set_channel",
            Command::RemoveSetChannel { .. } => "remove_set_channel",
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::AddVouches { .. }
                | Command::DeleteVouches { .. }
                | Command::SetChannel { .. }
                | Command::RemoveSetChannel { .. }
        )
    }

    /// Allowlist management is never gated so a bad allowlist can be fixed.
    pub fn is_gated(&self, policy: GatePolicy) -> bool {
        match policy {
            GatePolicy::VouchOnly => matches!(self, Command::Vouch { .. }),
            GatePolicy::AllCommands => {
                !matches!(self, Command::SetChannel { .. } | Command::RemoveSetChannel { .. })
            }
        }
    }

    /// Gated and admin-only commands need a guild to check against.
    pub fn requires_guild(&self, policy: GatePolicy) -> bool {
        self.is_gated(policy) || self.requires_admin()
    }
}

/// Run one command: guild, channel and permission checks, then the effect.
///
/// Rejections come back as caller-only replies. `Err` is reserved for store
/// failures, after which the in-memory state may be ahead of the file.
#[instrument(
    skip_all,
    fields(command = cmd.name(), guild = ?ctx.guild_id, channel = ctx.channel_id, user = ctx.user_id)
)]
pub async fn dispatch(state: &BotState, ctx: &CommandContext, cmd: Command) -> Result<Reply, ServiceError> {
    let guild = ctx.guild_id.map(|g| g.to_string());

    if cmd.requires_guild(state.gate) && guild.is_none() {
        debug!(reason = "no_guild", "command_rejected");
        return Ok(Reply::private(GUILD_ONLY));
    }
    if cmd.is_gated(state.gate) {
        if let Some(g) = guild.as_deref() {
            if !state.channels.is_allowed(g, ctx.channel_id).await {
                debug!(reason = "channel_not_allowed", "command_rejected");
                return Ok(Reply::private(CHANNEL_NOT_ALLOWED));
            }
        }
    }
    if cmd.requires_admin() && !ctx.is_admin {
        debug!(reason = "not_admin", "command_rejected");
        return Ok(Reply::private(ADMIN_ONLY));
    }

    match cmd {
        Command::Vouch { member, stars, details } => vouch::vouch(state, ctx, &member, stars, &details).await,
        Command::Vouches { member } => Ok(vouch::vouches(state, &member).await),
        Command::AddVouches { member, amount } => vouch::add_vouches(state, &member, amount).await,
        Command::DeleteVouches { member, amount } => vouch::delete_vouches(state, &member, amount).await,
        Command::TopVouched => Ok(vouch::top_vouched(state).await),
        // requires_guild guarantees a guild for both
        Command::SetChannel { channel_id } => {
            channels::set_channel(state, guild.as_deref().unwrap_or_default(), channel_id).await
        }
        Command::RemoveSetChannel { channel_id } => {
            channels::remove_set_channel(state, guild.as_deref().unwrap_or_default(), channel_id).await
        }
    }
}

pub fn user_mention(id: u64) -> String {
    format!("<@{id}>")
}

pub fn channel_mention(id: u64) -> String {
    format!("<#{id}>")
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::TimeZone;
    use service::file::{channel_allowlist::ChannelAllowlist, vouch_ledger::VouchLedger};

    use super::*;

    pub struct TestState {
        pub state: BotState,
        pub dir: std::path::PathBuf,
    }

    impl Drop for TestState {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    pub async fn state(gate: GatePolicy) -> TestState {
        let dir = std::env::temp_dir().join(format!("bot_cmd_{}", uuid::Uuid::new_v4()));
        let vouches = VouchLedger::new(dir.join("vouches.json")).await.expect("ledger");
        let channels = ChannelAllowlist::new(dir.join("allowed_channels.json")).await.expect("allowlist");
        let state = BotState { vouches, channels, gate, top_limit: 10 };
        TestState { state, dir }
    }

    pub fn ctx(channel_id: u64, is_admin: bool) -> CommandContext {
        CommandContext {
            guild_id: Some(1),
            channel_id,
            user_id: 500,
            is_admin,
            invoked_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    pub fn member(id: u64) -> TargetMember {
        TargetMember { id, display_name: format!("user{id}"), avatar_url: None }
    }
}
