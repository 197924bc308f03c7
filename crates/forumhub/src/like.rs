use crate::client::{submit, Transport};
use crate::prelude::{println, *};
use crate::topics::{print_topic, topic_view, TopicView};
use crate::Context;
use colored::Colorize;
use forumhub_core::models::{LikeAction, LikeToggle};
use forumhub_core::submission::SubmissionState;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct LikeOptions {
    /// Post to like or unlike
    pub post_id: u64,

    /// Topic containing the post; re-fetched and shown after the toggle
    #[arg(short, long)]
    pub topic: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct LikeOutput {
    pub post_id: u64,
    #[serde(flatten)]
    pub toggle: LikeToggle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicView>,
}

pub async fn handler<T: Transport>(options: LikeOptions, ctx: &Context<T>) -> Result<()> {
    let data = like_data(&options, ctx).await?;

    if options.json {
        println!("{}", to_json(&data)?);
        return Ok(());
    }

    let verb = match data.toggle.action {
        LikeAction::Liked => "Liked".bright_red(),
        LikeAction::Unliked => "Unliked".bright_black(),
    };
    println!(
        "\n{} post #{} ({} like(s))",
        verb,
        data.post_id,
        data.toggle.likes_count
    );
    if let Some(view) = &data.topic {
        print_topic(view);
    }

    Ok(())
}

/// Toggle a like as the session user. Concurrent toggles from elsewhere are
/// last-write-wins on the server.
pub async fn like_data<T: Transport>(options: &LikeOptions, ctx: &Context<T>) -> Result<LikeOutput> {
    let user_id = ctx.config.require_user()?;

    let mut state = SubmissionState::default();
    let toggle = submit(&mut state, ctx.client.toggle_like(user_id, options.post_id)).await?;

    let topic = match options.topic {
        Some(topic_id) => Some(topic_view(ctx.client.get_topic(topic_id).await?)),
        None => None,
    };

    Ok(LikeOutput {
        post_id: options.post_id,
        toggle,
        topic,
    })
}
