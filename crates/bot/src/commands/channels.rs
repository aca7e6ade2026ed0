use service::errors::ServiceError;

use super::{channel_mention, Reply};
use crate::state::BotState;

pub const ALREADY_ALLOWED: &str = "Channel already allowed.";
pub const NOT_IN_LIST: &str = "This channel is not in the allowed list.";

pub async fn set_channel(state: &BotState, guild: &str, channel_id: u64) -> Result<Reply, ServiceError> {
    if state.channels.add(guild, channel_id).await? {
        Ok(Reply::private(format!("Allowed channel set to: {}", channel_mention(channel_id))))
    } else {
        Ok(Reply::private(ALREADY_ALLOWED))
    }
}

pub async fn remove_set_channel(state: &BotState, guild: &str, channel_id: u64) -> Result<Reply, ServiceError> {
    if state.channels.remove(guild, channel_id).await? {
        Ok(Reply::private(format!("{} has been removed from allowed channels.", channel_mention(channel_id))))
    } else {
        Ok(Reply::private(NOT_IN_LIST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::commands::{dispatch, Command, GatePolicy};

    #[tokio::test]
    async fn set_and_remove_channel_replies() -> anyhow::Result<()> {
        let t = state(GatePolicy::VouchOnly).await;
        let admin = ctx(10, true);

        let r = dispatch(&t.state, &admin, Command::SetChannel { channel_id: 20 }).await?;
        assert_eq!(r, Reply::private("Allowed channel set to: <#20>"));
        let r = dispatch(&t.state, &admin, Command::SetChannel { channel_id: 20 }).await?;
        assert_eq!(r, Reply::private(ALREADY_ALLOWED));

        let r = dispatch(&t.state, &admin, Command::RemoveSetChannel { channel_id: 21 }).await?;
        assert_eq!(r, Reply::private(NOT_IN_LIST));
        let r = dispatch(&t.state, &admin, Command::RemoveSetChannel { channel_id: 20 }).await?;
        assert_eq!(r, Reply::private("<#20> has been removed from allowed channels."));

        // list emptied: guild is unrestricted again
        assert!(t.state.channels.is_allowed("1", 999).await);
        Ok(())
    }
}
