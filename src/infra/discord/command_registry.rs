// Serenity-backed remote command registry.

use crate::core::commands::{CommandKind, CommandOption, CommandPayload, CommandRegistryApi, OptionKind};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub struct SerenityCommandRegistry {
    http: Arc<serenity::Http>,
}

impl SerenityCommandRegistry {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandRegistryApi for SerenityCommandRegistry {
    async fn bulk_replace(&self, commands: &[CommandPayload]) -> anyhow::Result<()> {
        let commands = commands.iter().map(to_create_command).collect();
        serenity::Command::set_global_commands(&self.http, commands).await?;
        Ok(())
    }
}

fn command_type(kind: CommandKind) -> serenity::CommandType {
    match kind {
        CommandKind::ChatInput => serenity::CommandType::ChatInput,
        CommandKind::User => serenity::CommandType::User,
        CommandKind::Message => serenity::CommandType::Message,
    }
}

fn option_type(kind: OptionKind) -> serenity::CommandOptionType {
    match kind {
        OptionKind::SubCommand => serenity::CommandOptionType::SubCommand,
        OptionKind::SubCommandGroup => serenity::CommandOptionType::SubCommandGroup,
        OptionKind::String => serenity::CommandOptionType::String,
        OptionKind::Integer => serenity::CommandOptionType::Integer,
        OptionKind::Number => serenity::CommandOptionType::Number,
        OptionKind::Boolean => serenity::CommandOptionType::Boolean,
        OptionKind::User => serenity::CommandOptionType::User,
        OptionKind::Channel => serenity::CommandOptionType::Channel,
        OptionKind::Role => serenity::CommandOptionType::Role,
        OptionKind::Mentionable => serenity::CommandOptionType::Mentionable,
        OptionKind::Attachment => serenity::CommandOptionType::Attachment,
    }
}

fn to_create_option(option: &CommandOption) -> serenity::CreateCommandOption {
    let mut created = serenity::CreateCommandOption::new(
        option_type(option.kind),
        &option.name,
        &option.description,
    )
    .required(option.required)
    .set_autocomplete(option.autocomplete);

    for choice in &option.choices {
        created = created.add_string_choice(&choice.name, &choice.value);
    }
    if !option.options.is_empty() {
        created = created.set_sub_options(option.options.iter().map(to_create_option).collect::<Vec<_>>());
    }
    created
}

pub fn to_create_command(payload: &CommandPayload) -> serenity::CreateCommand {
    let mut command = serenity::CreateCommand::new(&payload.name).kind(command_type(payload.kind));
    if let Some(description) = &payload.description {
        command = command.description(description);
    }
    command.set_options(payload.options.iter().map(to_create_option).collect::<Vec<_>>())
}
