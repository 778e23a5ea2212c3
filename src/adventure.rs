//! The adventure loop: greets the announcement channel on startup and
//! answers every player message with one narration turn.

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use crate::config::DISCORD_MESSAGE_LIMIT;
use crate::discord_text::split_message;
use crate::narrator::NarrationError;
use crate::{Data, Error};

/// Sent once per startup to the announcement channel.
pub const GREETING: &str = "Greetings traveler! Welcome to the Steampunk City of London!";

/// The persona's name, prefixed onto every narration.
const NARRATOR_LABEL: &str = "The Floating Gear Man";

/// The one sentence players see when narration fails, whatever the cause.
const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try asking something else.";

/// Where a message came from, reduced to the kinds the bot tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Direct,
    Guild,
    Unknown,
}

impl ChannelKind {
    fn of(channel: &serenity::Channel) -> Self {
        match channel {
            serenity::Channel::Guild(_) => Self::Guild,
            serenity::Channel::Private(_) => Self::Direct,
            _ => Self::Unknown,
        }
    }
}

/// Greet the configured announcement channel once the gateway is ready.
///
/// An unresolvable channel and a failed send are both logged and swallowed;
/// the bot comes up either way.
pub async fn announce_arrival(ctx: &serenity::Context, channel_id: u64) {
    let channel = serenity::ChannelId::new(channel_id);
    match channel.to_channel(ctx).await {
        Ok(_) => {
            info!("Sending greeting message to channel {channel_id}");
            if let Err(err) = channel.say(&ctx.http, GREETING).await {
                error!("Failed to send greeting message: {err}");
            }
        }
        Err(_) => warn!("Channel with ID {channel_id} not found."),
    }
}

/// Answer one inbound message: mirror its attachments to the object store,
/// narrate its content, and send the reply to the originating channel.
pub async fn handle_player_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    if is_own_message(message, data.bot_id) {
        debug!("Received message from self, ignoring");
        return Ok(());
    }

    if !message.attachments.is_empty() {
        let urls = data.uploader.upload_all(&message.attachments).await;
        // Mirror copies only; the narration never sees these URLs.
        info!(
            "Uploaded {} of {} attachments",
            urls.len(),
            message.attachments.len()
        );
    }

    let typing = message.channel_id.start_typing(&ctx.http);
    let outcome = data.narrator.narrate(&message.content).await;
    drop(typing);

    match &outcome {
        Ok(text) => info!("Generated response: {text}"),
        Err(err) => error!("Failed to generate response: {err}"),
    }

    let reply = render_reply(outcome);
    for chunk in split_message(&reply, DISCORD_MESSAGE_LIMIT) {
        message.channel_id.say(&ctx.http, chunk).await?;
    }

    log_channel_kind(ctx, message).await;

    Ok(())
}

/// Only the bot's own messages are dropped; other bots get answered.
fn is_own_message(message: &serenity::Message, bot_id: u64) -> bool {
    message.author.id.get() == bot_id
}

/// The user-visible reply for a narration outcome: the narrator's line under
/// its label, or the fixed apology.
fn render_reply(outcome: Result<String, NarrationError>) -> String {
    match outcome {
        Ok(text) => format!("{NARRATOR_LABEL}: {text}"),
        Err(_) => FALLBACK_REPLY.to_string(),
    }
}

/// Diagnostic only; no behavior branches on the channel kind.
async fn log_channel_kind(ctx: &serenity::Context, message: &serenity::Message) {
    let kind = match message.channel(ctx).await {
        Ok(channel) => ChannelKind::of(&channel),
        Err(_) => ChannelKind::Unknown,
    };
    match kind {
        ChannelKind::Direct => debug!("Processing message in DM channel"),
        ChannelKind::Guild => {
            let guild = message
                .guild_id
                .and_then(|id| id.name(&ctx.cache))
                .unwrap_or_else(|| "unknown guild".to_string());
            debug!("Processing message in guild channel: {guild}");
        }
        ChannelKind::Unknown => {
            warn!("Unsupported channel type: {}", message.channel_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_message(author_id: u64) -> serenity::Message {
        let mut msg = serenity::Message::default();
        msg.author = serenity::User::default();
        msg.author.id = serenity::UserId::new(author_id);
        msg.content = "I open the door".to_string();
        msg
    }

    #[test]
    fn only_the_bots_own_messages_are_ignored() {
        let msg = mock_message(42);
        assert!(is_own_message(&msg, 42));
        // Another user, or another bot, with a different id.
        assert!(!is_own_message(&msg, 7));
    }

    #[test]
    fn narration_flows_into_prefixed_reply() {
        let reply = render_reply(Ok("You stand before a brass gate.".to_string()));
        assert_eq!(reply, "The Floating Gear Man: You stand before a brass gate.");
    }

    #[test]
    fn failed_narration_falls_back_to_apology() {
        let outcome = Err(NarrationError::MalformedResponse(
            "no completion choice with text content".to_string(),
        ));
        assert_eq!(
            render_reply(outcome),
            "Sorry, I encountered an error. Please try asking something else."
        );
    }
}
