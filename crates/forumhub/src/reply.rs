use crate::client::{submit, Transport};
use crate::prelude::{eprintln, println, *};
use crate::topics::{print_topic, topic_view, TopicView};
use crate::Context;
use colored::Colorize;
use forumhub_core::models::Attachment;
use forumhub_core::submission::SubmissionState;

#[derive(Debug, clap::Args, Clone)]
pub struct ReplyOptions {
    /// Topic to reply to
    pub topic_id: u64,

    /// Reply body (markdown subset)
    pub content: String,

    /// URL of an already uploaded file (can be repeated)
    #[arg(long = "attachment", value_name = "URL")]
    pub attachments: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handler<T: Transport>(options: ReplyOptions, ctx: &Context<T>) -> Result<()> {
    if ctx.verbose {
        eprintln!("Replying to topic {}...", options.topic_id);
    }

    let view = reply_data(&options, ctx).await?;

    if options.json {
        println!("{}", to_json(&view)?);
    } else {
        println!("\n{}", "Reply posted.".green());
        print_topic(&view);
    }

    Ok(())
}

/// Post a reply as the session user, then re-fetch the topic.
///
/// Locked topics are refused before the reply is sent. The server counts a
/// view on every topic fetch, so a reply adds two views.
pub async fn reply_data<T: Transport>(options: &ReplyOptions, ctx: &Context<T>) -> Result<TopicView> {
    let user_id = ctx.config.require_user()?;

    let topic = ctx.client.get_topic(options.topic_id).await?;
    if !topic.accepts_replies() {
        return Err(Error::TopicLocked(topic.id).into());
    }

    let attachments: Vec<Attachment> = options
        .attachments
        .iter()
        .map(|url| attachment_from_url(url))
        .collect();

    let mut state = SubmissionState::default();
    submit(
        &mut state,
        ctx.client
            .create_post(user_id, options.topic_id, &options.content, &attachments),
    )
    .await?;

    let topic = ctx.client.get_topic(options.topic_id).await?;
    Ok(topic_view(topic))
}

/// Describe an uploaded file from its URL. Size is unknown at this point.
pub fn attachment_from_url(url: &str) -> Attachment {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let name = path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("attachment")
        .to_string();

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let file_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    };

    Attachment {
        url: url.to_string(),
        file_type: file_type.to_string(),
        name,
        size: 0,
    }
}
