use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const TOKEN_ENV: &str = "DISCORD_TOKEN";
pub const DEFAULT_TOP_LIMIT: usize = 10;
/// Upper bound for the leaderboard size; keeps the embed description short.
pub const MAX_TOP_LIMIT: usize = 25;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize, Default)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
}

// token 不应出现在日志中
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &if self.token.is_empty() { "<empty>" } else { "<redacted>" })
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_vouches_file")]
    pub vouches_file: String,
    #[serde(default = "default_channels_file")]
    pub channels_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vouches_file: default_vouches_file(),
            channels_file: default_channels_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Apply the allowed-channel gate to every command, not only `vouch`.
    #[serde(default)]
    pub gate_all_commands: bool,
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self { gate_all_commands: false, top_limit: DEFAULT_TOP_LIMIT }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_data_dir() -> String { "data".into() }
fn default_vouches_file() -> String { "vouches.json".into() }
fn default_channels_file() -> String { "allowed_channels.json".into() }
fn default_top_limit() -> usize { DEFAULT_TOP_LIMIT }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`), falling back to defaults when the
    /// file does not exist, then normalize against the environment.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config file {path}: {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.bot.normalize_from_env();
        self.bot.validate()?;
        self.storage.normalize();
        self.commands.normalize();
        Ok(())
    }

    /// Full path of the vouch ledger file.
    pub fn vouches_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.storage.data_dir).join(&self.storage.vouches_file)
    }

    /// Full path of the channel allowlist file.
    pub fn channels_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.storage.data_dir).join(&self.storage.channels_file)
    }
}

impl BotConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 token，则从环境变量 DISCORD_TOKEN 填充
        if self.token.trim().is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                self.token = token;
            }
        }
        self.token = self.token.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(anyhow!("bot.token is empty; set it in config.toml or the {TOKEN_ENV} environment variable"));
        }
        if self.token.chars().any(char::is_whitespace) {
            return Err(anyhow!("bot.token must not contain whitespace"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        if self.vouches_file.trim().is_empty() {
            self.vouches_file = default_vouches_file();
        }
        if self.channels_file.trim().is_empty() {
            self.channels_file = default_channels_file();
        }
    }
}

impl CommandsConfig {
    fn normalize(&mut self) {
        self.top_limit = self.top_limit.clamp(1, MAX_TOP_LIMIT);
    }
}
