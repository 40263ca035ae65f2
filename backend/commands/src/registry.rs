/// Slash command registry: the two commands the bot announces.
use crate::types::{ArgType, CommandArg, CommandDef};

pub const SUBMIT_COMMAND: &str = "cpt";
pub const REPORT_COMMAND: &str = "displayprestige";

/// Name of the attachment option on the submit command.
pub const IMAGE_ARG: &str = "image";

/// Build the built-in command list.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: SUBMIT_COMMAND.into(),
            description: "Cherrow Prestige Tracker - Upload a screenshot to extract Prestige.".into(),
            args: vec![CommandArg {
                name: IMAGE_ARG.into(),
                description: "Upload your Cookie Run: Kingdom screenshot here.".into(),
                arg_type: ArgType::Attachment,
                required: true,
            }],
        },
        CommandDef {
            key: REPORT_COMMAND.into(),
            description: "Display current prestige and graph prestige progress over time.".into(),
            args: vec![],
        },
    ]
}

/// Lookup over the built-in commands.
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    pub fn find(&self, key: &str) -> Option<&CommandDef> {
        let key = key.trim_start_matches('/');
        self.commands.iter().find(|c| c.key.eq_ignore_ascii_case(key))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_image_attachment() {
        let registry = CommandRegistry::new();
        let cpt = registry.find("/cpt").unwrap();
        assert_eq!(cpt.args.len(), 1);
        assert_eq!(cpt.args[0].arg_type, ArgType::Attachment);
        assert!(cpt.args[0].required);
    }

    #[test]
    fn report_takes_no_args() {
        let registry = CommandRegistry::new();
        assert!(registry.find("displayprestige").unwrap().args.is_empty());
        assert!(registry.find("unknown").is_none());
    }

    #[test]
    fn slash_names_fit_discord_limits() {
        for cmd in builtin_commands() {
            assert!(cmd.key.len() <= 32 && cmd.key == cmd.key.to_lowercase());
            assert!(cmd.description.len() <= 100, "{} description too long", cmd.key);
        }
    }
}
