use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use tracing::info;

use service::errors::ServiceError;

use super::{user_mention, CommandContext, Embed, Reply, TargetMember};
use crate::state::BotState;

pub const STARS: RangeInclusive<i64> = 1..=5;
pub const STARS_OUT_OF_RANGE: &str = "Please provide stars between 1 and 5.";
pub const NO_DATA: &str = "No data.";
pub const MIDDLEMAN_FOOTER: &str = "⚠️ Use a reputable middleman for safe transactions.";

/// `03/09/2024, 02:05:07 PM UTC`
pub fn format_vouched_at(at: DateTime<Utc>) -> String {
    at.format("%m/%d/%Y, %I:%M:%S %p UTC").to_string()
}

/// Summary posted to the channel after a vouch. Stars and details end up
/// here only; the ledger keeps just the count.
pub fn vouch_embed(member: &TargetMember, stars: i64, details: &str, actor_id: u64, at: DateTime<Utc>) -> Embed {
    let shown = usize::try_from(stars).unwrap_or(0);
    Embed::new(format!("👍 New Vouch created for {}", member.display_name))
        .field("⭐ Rating", format!("{} ({stars}/5)", "🌟".repeat(shown)), false)
        .field("📝 Vouch", details, false)
        .field("👤 Vouched by", user_mention(actor_id), true)
        .field("📅 Vouched at", format_vouched_at(at), true)
        .thumbnail(member.avatar_url.clone())
        .footer(MIDDLEMAN_FOOTER)
}

pub async fn vouch(
    state: &BotState,
    ctx: &CommandContext,
    member: &TargetMember,
    stars: i64,
    details: &str,
) -> Result<Reply, ServiceError> {
    if !STARS.contains(&stars) {
        return Ok(Reply::private(STARS_OUT_OF_RANGE));
    }
    let total = state.vouches.increment_by(&member.id.to_string(), 1).await?;
    info!(target_user = member.id, actor = ctx.user_id, stars, total, "vouch_added");

    Ok(Reply::public(format!("The vouch has been added to {}!", user_mention(member.id)))
        .with_channel_embed(vouch_embed(member, stars, details, ctx.user_id, ctx.invoked_at)))
}

pub async fn vouches(state: &BotState, member: &TargetMember) -> Reply {
    let count = state.vouches.get(&member.id.to_string()).await;
    Reply::public(format!("{} has {} vouches.", member.display_name, count))
}

pub async fn add_vouches(state: &BotState, member: &TargetMember, amount: i64) -> Result<Reply, ServiceError> {
    let total = state.vouches.increment_by(&member.id.to_string(), amount).await?;
    Ok(Reply::public(format!("Added {} vouches to {}. Total: {}.", amount, member.display_name, total)))
}

pub async fn delete_vouches(state: &BotState, member: &TargetMember, amount: i64) -> Result<Reply, ServiceError> {
    // i64::MIN has no negation; saturate instead
    let delta = amount.checked_neg().unwrap_or(i64::MAX);
    let total = state.vouches.increment_by(&member.id.to_string(), delta).await?;
    Ok(Reply::public(format!(
        "Removed {} vouches from {}. Now they have {}.",
        amount, member.display_name, total
    )))
}

pub async fn top_vouched(state: &BotState) -> Reply {
    let ranked = state.vouches.top(state.top_limit).await;
    let description = ranked
        .iter()
        .enumerate()
        .map(|(i, (user, count))| format!("{}. <@{}> — {} vouches", i + 1, user, count))
        .collect::<Vec<_>>()
        .join("\n");
    let description = if description.is_empty() { NO_DATA.to_string() } else { description };
    Reply::public_embed(
        Embed::new(format!("🏆 Top {} Vouched Users", state.top_limit)).description(description),
    )
}
