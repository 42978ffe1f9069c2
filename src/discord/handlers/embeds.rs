// Embeds and button rows shared by the resource handlers.
//
// Staff messages carry the resource ID in the embed footer as `<id>#<kind>`,
// which is how the buttons on them find their resource again.

use crate::core::resources::{AverageRating, ContributorStats, Resource};
use anyhow::Context;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

pub const COLOR_INFO: u32 = 0x5865F2;
pub const COLOR_APPROVED: u32 = 0x2ECC71;
pub const COLOR_REPORT: u32 = 0xF1C40F;
pub const COLOR_DELETED: u32 = 0xDC143C;

pub const APPROVE_BUTTON: &str = "resource_approve";
pub const DECLINE_BUTTON: &str = "resource_decline";
pub const REPORT_DELETE_BUTTON: &str = "report_resource_delete";
pub const REPORT_SAVE_BUTTON: &str = "report_resource_save";
pub const REPORT_EDIT_BUTTON: &str = "report_resource_edit";
pub const REPORT_EDIT_MODAL: &str = "report_resource_edit_modal";

/// Public view of an active resource.
pub fn resource_embed(resource: &Resource, rating: AverageRating) -> CreateEmbed {
    CreateEmbed::new()
        .title(&resource.title)
        .url(&resource.url)
        .description(
            resource
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
        )
        .color(COLOR_INFO)
        .field("Tag", &resource.tag, true)
        .field("Author", format!("<@{}>", resource.author), true)
        .field("Rating", rating.to_string(), true)
        .footer(CreateEmbedFooter::new(format!("{}#{}", resource.id, resource.status)))
}

/// Staff review card for a new submission.
pub fn submission_embed(resource: &Resource) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("New submission: {}", resource.title))
        .description(
            [
                format!("**URL:** {}", resource.url),
                format!("**Tag:** {}", resource.tag),
                format!(
                    "**Description:** {}",
                    resource.description.as_deref().unwrap_or("None")
                ),
                format!("**Submitted By:** <@{}>", resource.author),
            ]
            .join("\n"),
        )
        .color(COLOR_INFO)
        .footer(CreateEmbedFooter::new(format!("{}#pending", resource.id)))
}

/// Staff card for a user report against a resource.
pub fn report_embed(resource: &Resource, reporter: u64, reason: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Resource reported: {}", resource.title))
        .description(
            [
                format!("**URL:** {}", resource.url),
                format!("**Author:** <@{}>", resource.author),
                format!("**Reported By:** <@{}>", reporter),
                format!("**Reason:** {}", reason),
            ]
            .join("\n"),
        )
        .color(COLOR_REPORT)
        .footer(CreateEmbedFooter::new(format!("{}#report", resource.id)))
}

pub fn stats_embed(user: &serenity::User, stats: &ContributorStats) -> CreateEmbed {
    let rating = stats
        .average_rating
        .map_or(AverageRating::Unrated, AverageRating::Rated);

    CreateEmbed::new()
        .title(format!("📚 Resource stats for {}", user.name))
        .thumbnail(user.face())
        .color(COLOR_INFO)
        .field("Active Resources", stats.active_resources.to_string(), true)
        .field("Total Submitted", stats.total_resources.to_string(), true)
        .field("Average Rating", rating.to_string(), true)
        .field("Reviews Written", stats.reviews_written.to_string(), true)
}

pub fn review_buttons(disabled: bool) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(APPROVE_BUTTON)
            .label("Approve")
            .style(serenity::ButtonStyle::Success)
            .disabled(disabled),
        serenity::CreateButton::new(DECLINE_BUTTON)
            .label("Decline")
            .style(serenity::ButtonStyle::Danger)
            .disabled(disabled),
    ])]
}

pub fn report_buttons(disabled: bool) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(REPORT_SAVE_BUTTON)
            .label("Keep")
            .style(serenity::ButtonStyle::Success)
            .disabled(disabled),
        serenity::CreateButton::new(REPORT_EDIT_BUTTON)
            .label("Edit")
            .style(serenity::ButtonStyle::Primary)
            .disabled(disabled),
        serenity::CreateButton::new(REPORT_DELETE_BUTTON)
            .label("Delete")
            .style(serenity::ButtonStyle::Danger)
            .disabled(disabled),
    ])]
}

/// `AB123#report` -> `AB123`
pub fn resource_id_from_footer(text: &str) -> Option<&str> {
    text.split('#')
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Resource ID stored in the footer of the message's first embed.
pub fn footer_resource_id(message: &serenity::Message) -> anyhow::Result<String> {
    message
        .embeds
        .first()
        .and_then(|embed| embed.footer.as_ref())
        .and_then(|footer| resource_id_from_footer(&footer.text))
        .map(str::to_string)
        .context("No resource ID found in message")
}

/// The message's first embed recoloured, with an outcome line appended.
pub fn resolved_embed(message: &serenity::Message, color: u32, outcome: &str) -> CreateEmbed {
    let original = message.embeds.first().cloned();
    let description = original
        .as_ref()
        .and_then(|embed| embed.description.clone())
        .unwrap_or_default();

    original
        .map(CreateEmbed::from)
        .unwrap_or_default()
        .color(color)
        .description(format!("{}\n{}", description, outcome).trim().to_string())
}
