use dotenvy::dotenv;
use std::env;
use std::num::NonZeroU64;

/// Process-wide settings, loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub announcement_channel_id: u64,
    pub openai_api_key: String,
    pub openai_model: String,
    pub minio_url: String,
    pub minio_username: String,
    pub minio_password: String,
}

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MINIO_URL: &str = "https://minio.example.com";
// MinIO's stock credentials; override both for any non-local store.
const DEFAULT_MINIO_USERNAME: &str = "minioadmin";
const DEFAULT_MINIO_PASSWORD: &str = "minioadmin";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN must be set"))?,
            // Discord ids are nonzero snowflakes; ChannelId::new panics on 0.
            announcement_channel_id: env::var("ANNOUNCEMENT_CHANNEL_ID")
                .map_err(|_| anyhow::anyhow!("ANNOUNCEMENT_CHANNEL_ID must be set"))?
                .parse::<NonZeroU64>()
                .map_err(|_| anyhow::anyhow!("ANNOUNCEMENT_CHANNEL_ID must be a valid u64"))?
                .get(),
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?,
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            minio_url: env::var("MINIO_URL").unwrap_or_else(|_| DEFAULT_MINIO_URL.to_string()),
            minio_username: env::var("MINIO_USERNAME")
                .unwrap_or_else(|_| DEFAULT_MINIO_USERNAME.to_string()),
            minio_password: env::var("MINIO_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_MINIO_PASSWORD.to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("announcement_channel_id", &self.announcement_channel_id)
            .field("openai_api_key", &"[REDACTED]")
            .field("openai_model", &self.openai_model)
            .field("minio_url", &self.minio_url)
            .field("minio_username", &self.minio_username)
            .field("minio_password", &"[REDACTED]")
            .finish()
    }
}

/// Discord message limit is 2000 characters
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_logic() {
        // 1. Test missing vars
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("ANNOUNCEMENT_CHANNEL_ID");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("OPENAI_MODEL");
        env::remove_var("MINIO_URL");
        env::remove_var("MINIO_USERNAME");
        env::remove_var("MINIO_PASSWORD");
        assert!(
            Config::build().is_err(),
            "Should fail when required vars are missing"
        );

        // 2. Test non-numeric channel id
        env::set_var("DISCORD_TOKEN", "test_token");
        env::set_var("ANNOUNCEMENT_CHANNEL_ID", "not-a-number");
        env::set_var("OPENAI_API_KEY", "secret_api_key");
        assert!(
            Config::build().is_err(),
            "Should fail when the channel id is not numeric"
        );

        // 3. Test zero channel id (no such Discord snowflake)
        env::set_var("ANNOUNCEMENT_CHANNEL_ID", "0");
        assert!(
            Config::build().is_err(),
            "Should fail when the channel id is zero"
        );

        // 4. Test required values and defaults
        env::set_var("ANNOUNCEMENT_CHANNEL_ID", "12345");
        let config = Config::build().unwrap();
        assert_eq!(config.discord_token, "test_token");
        assert_eq!(config.announcement_channel_id, 12345);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.minio_url, "https://minio.example.com");
        assert_eq!(config.minio_username, "minioadmin");
        assert_eq!(config.minio_password, "minioadmin");

        // 5. Test debug redaction
        env::set_var("MINIO_PASSWORD", "super-secret-pw");
        let config_redacted = Config::build().unwrap();
        let debug_output = format!("{:?}", config_redacted);
        assert!(!debug_output.contains("test_token"));
        assert!(!debug_output.contains("secret_api_key"));
        assert!(!debug_output.contains("super-secret-pw"));
        assert!(debug_output.contains("[REDACTED]"));

        // Cleanup
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("ANNOUNCEMENT_CHANNEL_ID");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("MINIO_PASSWORD");
    }
}
