use crate::{Context, Error};

/// Echo the provided message
#[poise::command(slash_command)]
pub async fn echo(
    ctx: Context<'_>,
    #[description = "Message to echo back"] message: String,
) -> Result<(), Error> {
    ctx.say(message).await?;
    Ok(())
}
