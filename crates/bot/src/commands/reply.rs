/// Dark grey used for every embed the bot sends.
pub const EMBED_COLOR: u32 = 0x607D8B;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral rich message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: EMBED_COLOR,
            fields: Vec::new(),
            thumbnail: None,
            footer: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }
}

/// What a command answers with.
///
/// `content`/`embed` form the interaction response; `channel_embed` is posted
/// to the invoking channel afterwards as a normal message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub ephemeral: bool,
    pub channel_embed: Option<Embed>,
}

impl Reply {
    /// Visible to everyone in the channel.
    pub fn public(text: impl Into<String>) -> Self {
        Self { content: Some(text.into()), ..Self::default() }
    }

    /// Visible only to the caller.
    pub fn private(text: impl Into<String>) -> Self {
        Self { content: Some(text.into()), ephemeral: true, ..Self::default() }
    }

    pub fn public_embed(embed: Embed) -> Self {
        Self { embed: Some(embed), ..Self::default() }
    }

    pub fn with_channel_embed(mut self, embed: Embed) -> Self {
        self.channel_embed = Some(embed);
        self
    }
}
