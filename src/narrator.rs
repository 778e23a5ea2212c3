//! One-shot, stateless narration through the OpenAI chat-completion API.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::info;

use crate::config::Config;

/// The fixed persona every message is answered with. The player's line is
/// appended in single quotes; no conversation history is carried between
/// calls.
const DUNGEON_MASTER_PROMPT: &str = "You are a DND dungeon master, give the player an amazing \
adventure in a time set where Steampunk machines reigned supreme in the city of London! Give \
the player a scenario could be funny, serious or normal and ask them to roll a d20 dice when \
they say they want to do something. BEFORE GIVING ANOTHER PROMPT, let them answer first. Based \
on what they said they rolled, respond accordingly. (1 being a low roll and 20 being a \
guarenteed action). Between each scenario, storytell about the surroundings of the city.";

/// Why a narration turn produced no text. Callers pick the user-facing
/// behavior per kind; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    /// The request never got an HTTP response out of the SDK.
    #[error("completion transport failed: {0}")]
    Network(OpenAIError),
    /// The provider answered with an explicit error (auth, rate limit, bad
    /// request), or the SDK failed in a way we do not recognize.
    #[error("completion provider error: {0}")]
    Provider(OpenAIError),
    /// A response arrived but carried no usable completion text.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl From<OpenAIError> for NarrationError {
    fn from(err: OpenAIError) -> Self {
        match err {
            e @ OpenAIError::Reqwest(_) => NarrationError::Network(e),
            OpenAIError::JSONDeserialize(e) => NarrationError::MalformedResponse(e.to_string()),
            other => NarrationError::Provider(other),
        }
    }
}

pub struct Narrator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl Narrator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(&config.openai_api_key);
        info!("Chat API initialized with model {}", config.openai_model);
        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    /// Generate one narration turn for a player's message.
    ///
    /// Every call is independent: the prompt is rebuilt from scratch, so two
    /// calls with the same line may tell very different stories.
    pub async fn narrate(&self, player_line: &str) -> Result<String, NarrationError> {
        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestSystemMessageArgs::default()
                .content(build_system_prompt(player_line))
                .build()?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()?;

        info!("Generating response using Chat API");
        let response = self.client.chat().create(request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                NarrationError::MalformedResponse(
                    "no completion choice with text content".to_string(),
                )
            })?;
        info!("Response generated successfully");
        Ok(text)
    }
}

/// Embed the player's line into the fixed system prompt.
fn build_system_prompt(player_line: &str) -> String {
    format!("{DUNGEON_MASTER_PROMPT}'{player_line}'")
}
