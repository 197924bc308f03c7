use crate::client::{submit, Transport};
use crate::prelude::{println, *};
use crate::Context;
use colored::Colorize;
use forumhub_core::submission::SubmissionState;

use super::read::{print_topic, topic_view, TopicView};

#[derive(Debug, clap::Args, Clone)]
pub struct CreateOptions {
    /// Forum the topic belongs to
    #[arg(short, long)]
    pub category: Option<u64>,

    #[arg(short, long)]
    pub title: String,

    /// Topic body (markdown subset)
    #[arg(long)]
    pub content: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handler<T: Transport>(options: CreateOptions, ctx: &Context<T>) -> Result<()> {
    let view = create_topic_data(&options, ctx).await?;

    if options.json {
        println!("{}", to_json(&view)?);
    } else {
        println!("\n{} #{}", "Created topic".green(), view.topic.id);
        print_topic(&view);
    }

    Ok(())
}

/// Create a topic as the session user, then re-fetch it
pub async fn create_topic_data<T: Transport>(
    options: &CreateOptions,
    ctx: &Context<T>,
) -> Result<TopicView> {
    let user_id = ctx.config.require_user()?;

    let mut state = SubmissionState::default();
    let created = submit(
        &mut state,
        ctx.client
            .create_topic(user_id, options.category, &options.title, &options.content),
    )
    .await?;
    log::info!("Created topic {}", created.id);

    let topic = ctx.client.get_topic(created.id).await?;
    Ok(topic_view(topic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::config::ForumConfig;
    use forumhub_core::api::Method;

    fn context(user_id: Option<u64>) -> Context<MockTransport> {
        let config = ForumConfig::from_lookup(|_| None)
            .unwrap()
            .with_overrides(None, user_id);
        Context::new(MockTransport::forum(), config, false)
    }

    fn options(title: &str) -> CreateOptions {
        CreateOptions {
            category: Some(2),
            title: title.to_string(),
            content: "Use `tokio::spawn`".to_string(),
            json: false,
        }
    }

    #[tokio::test]
    async fn test_create_topic_data_refetches_created_topic() {
        let ctx = context(Some(2));

        let view = create_topic_data(&options("Spawning tasks"), &ctx).await.unwrap();

        assert_eq!(view.topic.title, "Spawning tasks");
        assert_eq!(view.topic.category_id, 2);
        assert!(view.posts.is_empty());

        let calls = ctx.client.transport().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[1].method, Method::Get);
    }

    #[tokio::test]
    async fn test_create_topic_data_blank_title() {
        let ctx = context(Some(2));

        let err = create_topic_data(&options("   "), &ctx).await.unwrap_err();

        assert_eq!(err.to_string(), "Title is required");
        assert!(ctx.client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_topic_data_needs_session() {
        let ctx = context(None);

        let err = create_topic_data(&options("Hello"), &ctx).await.unwrap_err();

        assert!(err.to_string().contains("No user id set"));
        assert!(ctx.client.transport().calls().is_empty());
    }
}
