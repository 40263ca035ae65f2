/// Command types shared by the registry, the dispatcher and channel adapters.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// An uploaded file.
    Attachment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Command definition
// ---------------------------------------------------------------------------

/// A slash command as announced to the chat platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key, also the slash name (e.g. "cpt").
    pub key: String,
    pub description: String,
    pub args: Vec<CommandArg>,
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// An attachment as referenced by the platform: no bytes, just where to get them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub filename: String,
    pub url: String,
}

/// A parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub attachment: Option<AttachmentRef>,
}

impl CommandInvocation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, filename: impl Into<String>, url: impl Into<String>) -> Self {
        self.attachment = Some(AttachmentRef {
            filename: filename.into(),
            url: url.into(),
        });
        self
    }
}
