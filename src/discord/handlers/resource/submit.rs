use super::{reply_ephemeral, PARENT, TAGS};
use crate::core::commands::{CommandOption, HandlerModule, OptionKind, Subcommand};
use crate::core::resources::{DuplicateField, NewResource};
use crate::discord::handlers::{embeds, options};
use crate::discord::{Discord, DiscordClient};
use poise::serenity_prelude as serenity;

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    let tag = TAGS.iter().fold(
        CommandOption::new(OptionKind::String, "tag", "What kind of resource this is").required(),
        |option, tag| option.choice(*tag, *tag),
    );

    Ok(Subcommand::<Discord>::new(PARENT, "submit", "Submit a resource for review", submit)
        .with_options(vec![
            CommandOption::new(OptionKind::String, "title", "Resource title").required(),
            CommandOption::new(OptionKind::String, "url", "Link to the resource").required(),
            tag,
            CommandOption::new(OptionKind::String, "description", "Short description"),
        ])
        .into())
}

async fn submit(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let title = options::required_string(command, "title")?.trim();
    let url = options::required_string(command, "url")?.trim();
    let tag = options::required_string(command, "tag")?;
    let description = options::string(command, "description").unwrap_or_default().trim();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return reply_ephemeral(&client, command, "❌ The URL must start with http:// or https://").await;
    }

    let resources = &client.state.resources;
    for (field, value) in [(DuplicateField::Url, url), (DuplicateField::Title, title)] {
        if let Some(existing) = resources.check_duplicate(field, value).await? {
            return reply_ephemeral(
                &client,
                command,
                format!(
                    "❌ A resource with this {} already exists: `{}`",
                    field.column(),
                    existing
                ),
            )
            .await;
        }
    }

    let id = resources
        .submit_resource(NewResource {
            title: title.to_string(),
            tag: tag.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            author: command.user.id.to_string(),
        })
        .await?;

    let card = post_review_card(&client, &id).await;
    reply_ephemeral(&client, command, submitted_message(&id, &card)).await
}

/// Where the staff review card for a new submission ended up.
#[derive(Debug)]
enum ReviewCard {
    Posted,
    NoChannel,
    Failed,
}

async fn post_review_card(client: &DiscordClient, id: &str) -> ReviewCard {
    let Some(channel_id) = client.state.config.review_channel_id else {
        tracing::warn!(resource = %id, "No review channel configured, submission left pending");
        return ReviewCard::NoChannel;
    };

    let sent = async {
        let resource = client
            .state
            .resources
            .get_resource(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("submitted resource {} vanished", id))?;
        serenity::ChannelId::new(channel_id)
            .send_message(
                client.http(),
                serenity::CreateMessage::new()
                    .embed(embeds::submission_embed(&resource))
                    .components(embeds::review_buttons(false)),
            )
            .await?;
        anyhow::Ok(())
    }
    .await;

    match sent {
        Ok(()) => ReviewCard::Posted,
        Err(err) => {
            tracing::error!(resource = %id, error = ?err, "Failed to post review card");
            ReviewCard::Failed
        }
    }
}

fn submitted_message(id: &str, card: &ReviewCard) -> String {
    match card {
        ReviewCard::Posted => format!("✅ Submitted as `{}`. Staff will review it shortly.", id),
        ReviewCard::NoChannel => format!("✅ Submitted as `{}`. It is pending review.", id),
        ReviewCard::Failed => format!(
            "⚠️ Submitted as `{}`, but staff could not be notified. Please mention the ID to a moderator.",
            id
        ),
    }
}
