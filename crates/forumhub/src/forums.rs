use crate::client::{submit, Transport};
use crate::prelude::{eprintln, println, *};
use crate::Context;
use colored::Colorize;
use forumhub_core::models::Forum;
use forumhub_core::submission::SubmissionState;
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(name = "forums")]
#[command(about = "List or create forums")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all forums
    #[clap(name = "list")]
    List(ListOptions),

    /// Create a forum (admin)
    #[clap(name = "create")]
    Create(CreateOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct CreateOptions {
    pub name: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Icon name (defaults to MessageSquare)
    #[arg(long)]
    pub icon: Option<String>,

    /// Gradient style tag (defaults to gradient-purple-pink)
    #[arg(long)]
    pub gradient: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateForumOutput {
    pub created: Forum,
    pub forums: Vec<Forum>,
}

pub async fn run<T: Transport>(app: App, ctx: &Context<T>) -> Result<()> {
    if ctx.verbose {
        eprintln!("Running forums command...");
    }

    match app.command {
        Commands::List(options) => {
            let forums = ctx.client.get_forums().await?;
            if options.json {
                println!("{}", to_json(&forums)?);
            } else {
                print_forums(&forums);
            }
        }
        Commands::Create(options) => {
            let data = create_forum_data(&options, ctx).await?;
            if options.json {
                println!("{}", to_json(&data)?);
            } else {
                println!(
                    "\n{} {} (#{})",
                    "Created forum".green(),
                    data.created.name.bright_white().bold(),
                    data.created.id
                );
                print_forums(&data.forums);
            }
        }
    }

    Ok(())
}

/// Create a forum, then re-fetch the forum list
pub async fn create_forum_data<T: Transport>(
    options: &CreateOptions,
    ctx: &Context<T>,
) -> Result<CreateForumOutput> {
    let mut state = SubmissionState::default();
    let created = submit(
        &mut state,
        ctx.client.create_forum(
            &options.name,
            &options.description,
            options.icon.as_deref(),
            options.gradient.as_deref(),
        ),
    )
    .await?;

    let forums = ctx.client.get_forums().await?;
    Ok(CreateForumOutput { created, forums })
}

fn print_forums(forums: &[Forum]) {
    println!("\nFound {} forum(s):\n", forums.len().to_string().bold());

    if forums.is_empty() {
        return;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Description".bold().cyan(),
        "Topics".bold().cyan(),
        "Posts".bold().cyan()
    ]);

    for forum in forums {
        table.add_row(prettytable::row![
            forum.id.to_string().bright_yellow(),
            forum.name.bright_white(),
            forum.description,
            forum.topics_count,
            forum.total_posts
        ]);
    }

    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::config::ForumConfig;

    fn context() -> Context<MockTransport> {
        let config = ForumConfig::from_lookup(|_| None).unwrap();
        Context::new(MockTransport::forum(), config, false)
    }

    #[tokio::test]
    async fn test_create_forum_applies_defaults_and_refetches() {
        let ctx = context();
        let options = CreateOptions {
            name: "Off-topic".to_string(),
            description: "Anything goes".to_string(),
            icon: None,
            gradient: None,
            json: false,
        };

        let data = create_forum_data(&options, &ctx).await.unwrap();

        assert_eq!(data.created.icon, "MessageSquare");
        assert_eq!(data.created.gradient, "gradient-purple-pink");
        assert_eq!(data.forums.len(), 4);
        assert_eq!(ctx.client.transport().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_create_forum_requires_name() {
        let ctx = context();
        let options = CreateOptions {
            name: "  ".to_string(),
            description: String::new(),
            icon: None,
            gradient: None,
            json: false,
        };

        let err = create_forum_data(&options, &ctx).await.unwrap_err();

        assert_eq!(err.to_string(), "Name is required");
        assert!(ctx.client.transport().calls().is_empty());
    }
}
