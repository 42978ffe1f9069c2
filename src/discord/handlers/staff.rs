// Staff buttons on review and report cards.
//
// Every button resolves the card the same way: read the resource ID from the
// footer, apply the action, then recolour the card, stamp who did it and
// disable its buttons. Failures are shown to the clicking staff member only.

use super::{embeds, options};
use crate::core::resources::ResourceError;
use crate::discord::DiscordClient;
use poise::serenity_prelude as serenity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffAction {
    Approve,
    Decline,
    Delete,
    Keep,
}

impl StaffAction {
    fn describe(&self) -> &'static str {
        match self {
            StaffAction::Approve => "approving resource",
            StaffAction::Decline => "declining resource",
            StaffAction::Delete => "deleting resource",
            StaffAction::Keep => "keeping resource",
        }
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            StaffAction::Approve => "Resource Approved By",
            StaffAction::Decline => "Resource Declined By",
            StaffAction::Delete => "Resource Deleted By",
            StaffAction::Keep => "Report Dismissed By",
        }
    }

    fn color(&self) -> u32 {
        match self {
            StaffAction::Approve | StaffAction::Keep => embeds::COLOR_APPROVED,
            StaffAction::Decline | StaffAction::Delete => embeds::COLOR_DELETED,
        }
    }

    fn disabled_buttons(&self) -> Vec<serenity::CreateActionRow> {
        match self {
            StaffAction::Approve | StaffAction::Decline => embeds::review_buttons(true),
            StaffAction::Delete | StaffAction::Keep => embeds::report_buttons(true),
        }
    }
}

pub fn outcome_line(action: StaffAction, staff_id: u64, staff_name: &str) -> String {
    format!(
        "**{}:** <@{}> | `{}`",
        action.outcome_label(),
        staff_id,
        staff_name
    )
}

async fn apply(client: &DiscordClient, id: &str, staff: &str, action: StaffAction) -> anyhow::Result<()> {
    let resources = &client.state.resources;
    match action {
        StaffAction::Approve => resources.approve_resource(id, staff).await?,
        StaffAction::Decline => resources.decline_resource(id, staff).await?,
        StaffAction::Delete => resources.delete_resource(id, staff).await?,
        StaffAction::Keep => {
            if resources.get_resource(id).await?.is_none() {
                return Err(ResourceError::NotFound(id.to_string()).into());
            }
        }
    }
    Ok(())
}

pub async fn resolve_card(
    client: DiscordClient,
    interaction: serenity::Interaction,
    action: StaffAction,
) -> anyhow::Result<()> {
    let component = options::component(&interaction)?;
    let staff = &component.user;

    let result = match embeds::footer_resource_id(&component.message) {
        Ok(id) => apply(&client, &id, &staff.id.to_string(), action)
            .await
            .map(|()| id),
        Err(err) => Err(err),
    };

    let id = match result {
        Ok(id) => id,
        Err(err) => {
            let notice = serenity::CreateInteractionResponseMessage::new()
                .content(format!(
                    "❌ An error occurred while {}: {}",
                    action.describe(),
                    err
                ))
                .ephemeral(true);
            if let Err(send_err) = component
                .create_response(
                    client.http(),
                    serenity::CreateInteractionResponse::Message(notice),
                )
                .await
            {
                tracing::warn!(error = %send_err, "Failed to send staff error notice");
            }
            return Err(err);
        }
    };

    let embed = embeds::resolved_embed(
        &component.message,
        action.color(),
        &outcome_line(action, staff.id.get(), &staff.name),
    );
    component
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .components(action.disabled_buttons()),
            ),
        )
        .await?;

    tracing::info!(resource = %id, staff = %staff.id, ?action, "Staff action applied");
    Ok(())
}
