use gearcord::commands::echo;
use gearcord::narrator::Narrator;
use gearcord::uploader::Uploader;
use gearcord::{adventure, config::Config, Data};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Console and app.log layers; the guard flushes the file writer on exit.
    let _log_guard = gearcord::logging::init()?;

    // Load configuration
    let config = Config::from_env()?;
    let discord_token = config.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![echo::echo()],
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    match event {
                        serenity::FullEvent::Message { new_message } => {
                            adventure::handle_player_message(ctx, new_message, data).await?;
                        }
                        _ => {}
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                adventure::announce_arrival(ctx, config.announcement_channel_id).await;

                let narrator = Narrator::new(&config);
                let uploader = Uploader::new(&config);
                let bot_id = ready.user.id.get();

                Ok(Data {
                    config,
                    narrator,
                    uploader,
                    bot_id,
                })
            })
        })
        .build();

    // MESSAGE_CONTENT is privileged and must also be enabled for the bot
    // account in the developer portal.
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&discord_token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Could not register ctrl+c handler");
        info!("Stopping Discord bot...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord bot...");
    if let Err(why) = client.start().await {
        error!("Failed to start services due to: {}", why);
    }
    info!("Discord bot stopped");

    Ok(())
}
