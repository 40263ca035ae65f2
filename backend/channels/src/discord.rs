use std::sync::Arc;

use crate::ChannelAdapter;
use crate::discord_slash::{build_slash_commands, invocation_from};
use async_trait::async_trait;
use prestigebot_commands::{CommandContext, CommandDispatcher, CommandRegistry, CommandResponse};
use serenity::all::{
    Client, Command, CommandInteraction, Context, CreateAttachment, CreateInteractionResponseFollowup,
    EventHandler, GatewayIntents, Interaction, Ready,
};
use tracing::{error, info, warn};

struct Handler {
    dispatcher: Arc<CommandDispatcher>,
}

impl Handler {
    async fn on_command(&self, ctx: &Context, command: &CommandInteraction) {
        // OCR and chart rendering outlast Discord's three second window.
        if let Err(e) = command.defer(&ctx.http).await {
            warn!("Could not defer /{}: {:?}", command.data.name, e);
            return;
        }

        let inv = invocation_from(&command.data);
        let cmd_ctx = CommandContext::new(command.channel_id.to_string(), command.user.id.to_string());
        let response = self.dispatcher.dispatch(&cmd_ctx, &inv).await;

        if let Err(e) = command.create_followup(&ctx.http, followup(response)).await {
            error!("Error sending follow-up for /{}: {:?}", command.data.name, e);
        }
    }
}

fn followup(response: CommandResponse) -> CreateInteractionResponseFollowup {
    let mut builder = CreateInteractionResponseFollowup::new()
        .content(response.text)
        .ephemeral(response.ephemeral);
    if let Some(file) = response.attachment {
        builder = builder.add_file(CreateAttachment::bytes(file.bytes, file.filename));
    }
    builder
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(id = %ready.user.id, "{} is connected!", ready.user.name);

        let commands = build_slash_commands(CommandRegistry::new().all());
        match Command::set_global_commands(&ctx.http, commands).await {
            Ok(synced) => info!("Synced {} command(s)", synced.len()),
            Err(e) => error!("Failed to sync slash commands: {:?}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.on_command(&ctx, &command).await;
        }
    }
}

pub struct DiscordAdapter {
    token: String,
    dispatcher: Arc<CommandDispatcher>,
}

impl DiscordAdapter {
    pub fn new(token: String, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { token, dispatcher }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str { "discord" }

    async fn start(&self) -> anyhow::Result<()> {
        info!("Starting Discord adapter");

        // Slash commands only; no message content needed.
        let intents = GatewayIntents::non_privileged();

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler { dispatcher: Arc::clone(&self.dispatcher) })
            .await?;

        if let Err(why) = client.start().await {
            error!("Client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}
