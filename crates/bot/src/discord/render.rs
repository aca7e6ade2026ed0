use serenity::all::{
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateMessage,
};

use crate::commands::{Embed, Reply};

pub fn embed(e: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new().title(e.title.as_str()).colour(e.color);
    if let Some(text) = &e.description {
        out = out.description(text.as_str());
    }
    for f in &e.fields {
        out = out.field(f.name.as_str(), f.value.as_str(), f.inline);
    }
    if let Some(url) = &e.thumbnail {
        out = out.thumbnail(url.as_str());
    }
    if let Some(text) = &e.footer {
        out = out.footer(CreateEmbedFooter::new(text.as_str()));
    }
    out
}

pub fn interaction_response(reply: &Reply) -> CreateInteractionResponse {
    let mut msg = CreateInteractionResponseMessage::new().ephemeral(reply.ephemeral);
    if let Some(text) = &reply.content {
        msg = msg.content(text.as_str());
    }
    if let Some(e) = &reply.embed {
        msg = msg.embed(embed(e));
    }
    CreateInteractionResponse::Message(msg)
}

/// Follow-up message for the invoking channel, if the reply has one.
pub fn channel_message(reply: &Reply) -> Option<CreateMessage> {
    reply.channel_embed.as_ref().map(|e| CreateMessage::new().embed(embed(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::reply::EMBED_COLOR;

    #[test]
    fn embed_serializes_all_parts() {
        let e = Embed::new("title")
            .description("desc")
            .field("a", "1", true)
            .thumbnail(Some("https://cdn.example/t.png".into()))
            .footer("foot");
        let v = serde_json::to_value(embed(&e)).expect("serialize");
        assert_eq!(v["title"], "title");
        assert_eq!(v["description"], "desc");
        assert_eq!(v["color"], EMBED_COLOR);
        assert_eq!(v["fields"][0]["name"], "a");
        assert_eq!(v["fields"][0]["inline"], true);
        assert_eq!(v["thumbnail"]["url"], "https://cdn.example/t.png");
        assert_eq!(v["footer"]["text"], "foot");
    }

    #[test]
    fn follow_up_only_when_reply_carries_channel_embed() {
        assert!(channel_message(&Reply::private("no")).is_none());
        let with_follow_up = Reply::public("ok").with_channel_embed(Embed::new("x"));
        assert!(channel_message(&with_follow_up).is_some());
    }
}
