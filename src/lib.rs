pub mod adventure;
pub mod commands;
pub mod config;
pub mod discord_text;
pub mod logging;
pub mod narrator;
pub mod uploader;

/// Custom data passed to all commands and event handlers
pub struct Data {
    pub config: config::Config,
    pub narrator: narrator::Narrator,
    pub uploader: uploader::Uploader,
    /// Bot's own user ID for the self-message check
    pub bot_id: u64,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
