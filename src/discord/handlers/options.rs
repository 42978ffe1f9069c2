// Helpers for pulling typed pieces out of raw interactions.

use anyhow::{bail, Context};
use poise::serenity_prelude as serenity;

pub fn command(
    interaction: &serenity::Interaction,
) -> anyhow::Result<&serenity::CommandInteraction> {
    match interaction {
        serenity::Interaction::Command(command) | serenity::Interaction::Autocomplete(command) => {
            Ok(command)
        }
        _ => bail!("expected a command interaction"),
    }
}

pub fn component(
    interaction: &serenity::Interaction,
) -> anyhow::Result<&serenity::ComponentInteraction> {
    match interaction {
        serenity::Interaction::Component(component) => Ok(component),
        _ => bail!("expected a component interaction"),
    }
}

pub fn modal(interaction: &serenity::Interaction) -> anyhow::Result<&serenity::ModalInteraction> {
    match interaction {
        serenity::Interaction::Modal(modal) => Ok(modal),
        _ => bail!("expected a modal submission"),
    }
}

/// Options of the invoked subcommand, or the top-level options.
fn leaf_options(options: &[serenity::CommandDataOption]) -> &[serenity::CommandDataOption] {
    match options.first().map(|option| &option.value) {
        Some(serenity::CommandDataOptionValue::SubCommand(inner)) => inner,
        _ => options,
    }
}

fn find<'a>(
    command: &'a serenity::CommandInteraction,
    name: &str,
) -> Option<&'a serenity::CommandDataOptionValue> {
    leaf_options(&command.data.options)
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string<'a>(command: &'a serenity::CommandInteraction, name: &str) -> Option<&'a str> {
    find(command, name).and_then(|value| value.as_str())
}

pub fn required_string<'a>(
    command: &'a serenity::CommandInteraction,
    name: &str,
) -> anyhow::Result<&'a str> {
    string(command, name).with_context(|| format!("missing option `{}`", name))
}

pub fn integer(command: &serenity::CommandInteraction, name: &str) -> Option<i64> {
    find(command, name).and_then(|value| value.as_i64())
}

/// The text the user is typing into the focused autocomplete field.
pub fn focused_value(command: &serenity::CommandInteraction) -> &str {
    command
        .data
        .autocomplete()
        .map(|option| option.value)
        .unwrap_or_default()
}

/// Value of the text input with `custom_id` in a submitted modal.
pub fn modal_value<'a>(modal: &'a serenity::ModalInteraction, custom_id: &str) -> Option<&'a str> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                input.value.as_deref()
            }
            _ => None,
        })
}

/// Discord autocomplete names are capped at 100 characters.
pub fn choice_name(name: &str) -> String {
    if name.chars().count() <= 100 {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(99).collect();
    truncated.push('…');
    truncated
}
