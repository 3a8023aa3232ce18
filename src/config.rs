use std::path::Path;

use config::builder::DefaultState;
use config::ConfigBuilder;
use tgdigest_collector::SourceKind;
use tgdigest_common::DigestConfig;

use crate::error::{DigestError, DigestResult};
use crate::service::RunMode;

const DEFAULT_SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub source: tgdigest_collector::Config,
    pub ai: Option<tgdigest_ai::Config>,
    pub bot: Option<tgdigest_bot::Config>,
}

impl Config {
    /// Environment (`DIGEST__CHANNELS=a;b`, `BOT__TOKEN=...`) layered over
    /// the settings file. An explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> DigestResult<Config> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => builder = builder.add_source(config::File::from(path)),
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
                builder = builder.add_source(config::File::with_name(DEFAULT_SETTINGS_FILE));
            }
            None => {}
        }

        let env_config = config::Environment::default()
            .separator("__")
            .list_separator(";")
            .with_list_parse_key("digest.channels")
            .try_parsing(true);

        Self::build(builder.add_source(env_config))
    }

    pub(crate) fn build(builder: ConfigBuilder<DefaultState>) -> DigestResult<Config> {
        Ok(builder.build()?.try_deserialize::<Config>()?)
    }

    /// Fail before any network activity if `mode` cannot run with this
    /// configuration.
    pub fn validate(&self, mode: RunMode) -> DigestResult<()> {
        if self.digest.channel_handles().is_empty() {
            return Err(missing("digest.channels"));
        }

        if mode != RunMode::Preview && !self.ai.as_ref().is_some_and(|ai| ai.has_api_key()) {
            return Err(missing("ai.api_key"));
        }

        if mode == RunMode::Full {
            match &self.bot {
                Some(bot) if !bot.token.trim().is_empty() => {}
                _ => return Err(missing("bot.token and bot.chat_id")),
            }
        }

        if self.source.kind == SourceKind::Client {
            if self.source.api_id.is_none() {
                return Err(missing("source.api_id"));
            }
            if self.source.session_file.is_none() {
                return Err(missing("source.session_file"));
            }
        }

        Ok(())
    }
}

fn missing(what: &str) -> DigestError {
    DigestError::ConfigMissing(what.to_string())
}
