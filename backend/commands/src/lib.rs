pub mod context;
pub mod dispatch;
pub mod fetch;
pub mod handlers;
pub mod registry;
pub mod replies;
pub mod types;

pub use context::AppContext;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse, ResponseAttachment};
pub use fetch::HttpImageFetcher;
pub use handlers::{ShowReportHandler, SubmitScreenshotHandler};
pub use registry::{builtin_commands, CommandRegistry, REPORT_COMMAND, SUBMIT_COMMAND};
pub use types::{ArgType, AttachmentRef, CommandArg, CommandDef, CommandInvocation};

use std::sync::Arc;

/// Build a dispatcher wired with both bot commands over one shared context.
pub fn build_default_dispatcher(app: Arc<AppContext>) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(SUBMIT_COMMAND, Arc::new(SubmitScreenshotHandler::new(Arc::clone(&app))));
    dispatcher.register(REPORT_COMMAND, Arc::new(ShowReportHandler::new(app)));
    dispatcher
}
