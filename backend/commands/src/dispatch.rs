/// Command dispatch: route slash command invocations to handlers.
///
/// Dispatch never fails. A handler error is logged, audited and turned into
/// the generic failure reply, so every interaction gets exactly one answer.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use logging::{CommandEvent, EventLogger};
use tracing::{error, info};

use crate::replies;
use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub channel: String,
    pub sender_id: String,
}

impl CommandContext {
    pub fn new(channel: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            sender_id: sender_id.into(),
        }
    }
}

/// A file sent along with the reply.
#[derive(Debug, Clone)]
pub struct ResponseAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The result returned by a command handler: text reply plus optional file.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub text: String,
    pub ephemeral: bool, // only visible to the invoker
    pub attachment: Option<ResponseAttachment>,
}

impl CommandResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), ephemeral: false, attachment: None }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self { text: text.into(), ephemeral: true, attachment: None }
    }

    pub fn with_attachment(mut self, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.attachment = Some(ResponseAttachment { filename: filename.into(), bytes });
        self
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub async fn dispatch(&self, ctx: &CommandContext, inv: &CommandInvocation) -> CommandResponse {
        let Some(handler) = self.handlers.get(&inv.key) else {
            return CommandResponse::ephemeral(format!(
                "❓ No handler registered for command /{}", inv.key
            ));
        };

        info!("[Commands] Dispatching /{} from {} in {}", inv.key, ctx.sender_id, ctx.channel);
        match handler.handle(ctx, inv).await {
            Ok(response) => response,
            Err(e) => {
                error!("[Commands] /{} failed: {:#}", inv.key, e);
                EventLogger::log_event(
                    &inv.key,
                    &ctx.sender_id,
                    CommandEvent::Failed { error_msg: format!("{e:#}") },
                );
                CommandResponse::ok(replies::GENERIC_FAILURE)
            }
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
            Ok(CommandResponse::ok(format!("hi {}", ctx.sender_id)))
        }
    }

    struct Broken;

    #[async_trait]
    impl CommandHandler for Broken {
        async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
            anyhow::bail!("disk on fire")
        }
    }

    fn dispatcher() -> CommandDispatcher {
        let mut d = CommandDispatcher::new();
        d.register("echo", Arc::new(Echo));
        d.register("broken", Arc::new(Broken));
        d
    }

    #[tokio::test]
    async fn routes_to_registered_handler() {
        let ctx = CommandContext::new("discord", "42");
        let resp = dispatcher().dispatch(&ctx, &CommandInvocation::new("echo")).await;
        assert_eq!(resp.text, "hi 42");
        assert!(!resp.ephemeral);
    }

    #[tokio::test]
    async fn unknown_command_is_ephemeral() {
        let ctx = CommandContext::new("discord", "42");
        let resp = dispatcher().dispatch(&ctx, &CommandInvocation::new("nope")).await;
        assert!(resp.ephemeral);
        assert!(resp.text.contains("/nope"));
    }

    #[tokio::test]
    async fn handler_error_becomes_generic_reply() {
        let ctx = CommandContext::new("discord", "42");
        let resp = dispatcher().dispatch(&ctx, &CommandInvocation::new("broken")).await;
        assert_eq!(resp.text, replies::GENERIC_FAILURE);
        assert!(resp.attachment.is_none());
    }
}
