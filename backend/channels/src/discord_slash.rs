//! Discord Slash Commands
//!
//! Builds the application command payloads from the command registry and
//! turns incoming interaction data back into a `CommandInvocation`.

use prestigebot_commands::{ArgType, CommandDef, CommandInvocation};
use serenity::all::{
    CommandData, CommandDataOptionValue, CommandOptionType, CreateCommand, CreateCommandOption,
};

fn option_type(arg_type: &ArgType) -> CommandOptionType {
    match arg_type {
        ArgType::Attachment => CommandOptionType::Attachment,
    }
}

/// One `CreateCommand` per registry entry, ready for global registration.
pub fn build_slash_commands(defs: &[CommandDef]) -> Vec<CreateCommand> {
    defs.iter()
        .map(|def| {
            def.args.iter().fold(
                CreateCommand::new(&def.key).description(&def.description),
                |cmd, arg| {
                    cmd.add_option(
                        CreateCommandOption::new(option_type(&arg.arg_type), &arg.name, &arg.description)
                            .required(arg.required),
                    )
                },
            )
        })
        .collect()
}

/// Read the command name and its first attachment option, if any.
pub fn invocation_from(data: &CommandData) -> CommandInvocation {
    let mut inv = CommandInvocation::new(data.name.clone());
    let attachment = data.options.iter().find_map(|opt| match &opt.value {
        CommandDataOptionValue::Attachment(id) => data.resolved.attachments.get(id),
        _ => None,
    });
    if let Some(att) = attachment {
        inv = inv.with_attachment(att.filename.clone(), att.url.clone());
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use prestigebot_commands::builtin_commands;

    #[test]
    fn builds_one_payload_per_command() {
        let payloads = build_slash_commands(&builtin_commands());
        let json = serde_json::to_value(&payloads).unwrap();
        let names: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["cpt", "displayprestige"]);
    }

    #[test]
    fn image_option_is_required_attachment() {
        let payloads = build_slash_commands(&builtin_commands());
        let json = serde_json::to_value(&payloads[0]).unwrap();
        let opt = &json["options"][0];
        assert_eq!(opt["name"], "image");
        assert_eq!(opt["type"], 11);
        assert_eq!(opt["required"], true);
    }
}
