use serenity::all::{ChannelType, CommandOptionType, CreateCommand, CreateCommandOption};

fn member_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "member", description).required(true)
}

fn amount_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Integer, "amount", description).required(true)
}

fn channel_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Channel, "channel", description)
        .channel_types(vec![ChannelType::Text])
        .required(true)
}

/// Slash command surface, registered globally on `ready`. The leaderboard
/// description names the configured size.
pub fn definitions(top_limit: usize) -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("vouch")
            .description("Give a vouch to a member")
            .add_option(member_option("User to vouch for"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "stars", "Rating 1-5").required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "details", "Details").required(true),
            ),
        CreateCommand::new("vouches")
            .description("Check how many vouches a user has")
            .add_option(member_option("User to check")),
        CreateCommand::new("delete_vouches")
            .description("Remove vouches from a user")
            .add_option(member_option("User to remove vouches from"))
            .add_option(amount_option("Amount to remove")),
        CreateCommand::new("add_vouches")
            .description("Add vouches to a user")
            .add_option(member_option("User to add vouches to"))
            .add_option(amount_option("Amount to add")),
        CreateCommand::new("top_vouched")
            .description(format!("Show top {top_limit} users with most vouches")),
        CreateCommand::new("set_channel")
            .description("Set allowed channel for bot commands")
            .add_option(channel_option("Choose the channel")),
        CreateCommand::new("remove_set_channel")
            .description("Remove an allowed channel (admin only)")
            .add_option(channel_option("Choose the channel to remove")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::COMMAND_NAMES;

    #[test]
    fn registers_every_command_once() {
        let defs: Vec<serde_json::Value> = definitions(10)
            .iter()
            .map(|c| serde_json::to_value(c).expect("serialize"))
            .collect();
        let names: Vec<&str> = defs.iter().filter_map(|d| d["name"].as_str()).collect();
        assert_eq!(names, COMMAND_NAMES.to_vec());

        let vouch = &defs[0];
        let opts: Vec<&str> = vouch["options"]
            .as_array()
            .expect("options")
            .iter()
            .filter_map(|o| o["name"].as_str())
            .collect();
        assert_eq!(opts, vec!["member", "stars", "details"]);
        assert!(vouch["options"][0]["required"].as_bool().unwrap_or(false));
        assert_eq!(defs[4]["description"], "Show top 10 users with most vouches");
    }

    #[test]
    fn leaderboard_description_follows_limit() {
        let top = serde_json::to_value(&definitions(3)[4]).expect("serialize");
        assert_eq!(top["name"], "top_vouched");
        assert_eq!(top["description"], "Show top 3 users with most vouches");
    }
}
