//! Serenity adapter: turns slash-command interactions into [`Command`]s and
//! renders [`Reply`]s back.

pub mod register;
pub mod render;

use chrono::Utc;
use serenity::all::{
    Command as SlashCommand, CommandInteraction, Context, EventHandler, GatewayIntents, Interaction,
    PartialMember, Ready, ResolvedValue, User,
};
use serenity::async_trait;
use tracing::{error, info, warn};

use crate::commands::{self, Command, CommandContext, OptionValue, Reply, TargetMember};
use crate::errors::CommandParseError;
use crate::state::BotState;

pub const STORAGE_FAILURE: &str = "Something went wrong while saving. Please try again later.";

/// Members and message content are privileged; they must be enabled for the
/// application in the developer portal.
pub fn intents() -> GatewayIntents {
    GatewayIntents::non_privileged() | GatewayIntents::GUILD_MEMBERS | GatewayIntents::MESSAGE_CONTENT
}

pub struct Handler {
    state: BotState,
}

impl Handler {
    pub fn new(state: BotState) -> Self { Self { state } }

    async fn handle(&self, interaction: &CommandInteraction) -> Reply {
        let cmd = match parse(interaction) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!(command = %interaction.data.name, error = %e, "command_parse_failed");
                return Reply::private(e.user_message());
            }
        };
        let ctx = context(interaction);
        match commands::dispatch(&self.state, &ctx, cmd).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(command = %interaction.data.name, error = %e, "command_store_failed");
                Reply::private(STORAGE_FAILURE)
            }
        }
    }
}

/// Nickname, then global name, then username.
pub fn target_member(user: &User, member: Option<&PartialMember>) -> TargetMember {
    let display_name = member
        .and_then(|m| m.nick.clone())
        .or_else(|| user.global_name.clone())
        .unwrap_or_else(|| user.name.clone());
    TargetMember { id: user.id.get(), display_name, avatar_url: user.avatar_url() }
}

fn option_value(value: &ResolvedValue<'_>) -> Option<OptionValue> {
    match value {
        ResolvedValue::User(user, member) => Some(OptionValue::User(target_member(user, *member))),
        ResolvedValue::Integer(i) => Some(OptionValue::Integer(*i)),
        ResolvedValue::String(s) => Some(OptionValue::String((*s).to_string())),
        ResolvedValue::Channel(channel) => Some(OptionValue::Channel(channel.id.get())),
        // unresolved users and unexpected kinds surface as a missing option
        _ => None,
    }
}

fn parse(interaction: &CommandInteraction) -> Result<Command, CommandParseError> {
    let options = interaction
        .data
        .options()
        .iter()
        .filter_map(|opt| option_value(&opt.value).map(|v| (opt.name.to_string(), v)))
        .collect();
    Command::from_options(&interaction.data.name, options)
}

/// Admin means the resolved channel permissions carry ADMINISTRATOR; no
/// member (a DM) is never admin.
fn context(interaction: &CommandInteraction) -> CommandContext {
    CommandContext {
        guild_id: interaction.guild_id.map(|g| g.get()),
        channel_id: interaction.channel_id.get(),
        user_id: interaction.user.id.get(),
        is_admin: interaction
            .member
            .as_ref()
            .and_then(|m| m.permissions)
            .is_some_and(|p| p.administrator()),
        invoked_at: Utc::now(),
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let definitions = register::definitions(self.state.top_limit);
        match SlashCommand::set_global_commands(&ctx.http, definitions).await {
            Ok(registered) => {
                info!(service = "bot", event = "commands_synced", count = registered.len(), "slash commands registered")
            }
            Err(e) => {
                error!(service = "bot", event = "commands_sync_failed", error = %e, "failed to register slash commands")
            }
        }
        info!(
            service = "bot",
            event = "ready",
            user = %ready.user.name,
            user_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "bot ready"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let reply = self.handle(&command).await;

        if let Err(e) = command.create_response(&ctx.http, render::interaction_response(&reply)).await {
            error!(command = %command.data.name, error = %e, "interaction_response_failed");
            return;
        }
        if let Some(message) = render::channel_message(&reply) {
            if let Err(e) = command.channel_id.send_message(&ctx.http, message).await {
                error!(
                    command = %command.data.name,
                    channel = %command.channel_id,
                    error = %e,
                    "channel_message_failed"
                );
            }
        }
    }
}
