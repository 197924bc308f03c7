use crate::client::Transport;
use crate::prelude::{println, *};
use crate::present::{author_line, format_segments, terminal_safe};
use crate::Context;
use colored::Colorize;
use forumhub_core::models::{Post, Topic};
use forumhub_core::render::{render_content, Segment};
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct ReadOptions {
    /// Topic id
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A topic with its body and replies already rendered
#[derive(Debug, Serialize)]
pub struct TopicView {
    pub topic: Topic,
    pub segments: Vec<Segment>,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub post: Post,
    pub segments: Vec<Segment>,
}

pub async fn handler<T: Transport>(options: ReadOptions, ctx: &Context<T>) -> Result<()> {
    let topic = ctx.client.get_topic(options.id).await?;
    let view = topic_view(topic);

    if options.json {
        println!("{}", to_json(&view)?);
    } else {
        print_topic(&view);
    }

    Ok(())
}

/// Render a fetched topic. The posts move out of the topic into the view.
pub fn topic_view(mut topic: Topic) -> TopicView {
    let posts = topic
        .posts
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(|post| PostView {
            segments: render_content(&post.content),
            post,
        })
        .collect();

    TopicView {
        segments: render_content(&topic.content),
        topic,
        posts,
    }
}

pub fn print_topic(view: &TopicView) {
    print!("{}", format_topic_text(view));
}

fn format_topic_text(view: &TopicView) -> String {
    let topic = &view.topic;
    let mut out = String::new();

    out.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    out.push_str(&f!(
        "{} {}\n",
        f!("[{}]", topic.id).yellow().bold(),
        terminal_safe(&topic.title).bright_white().bold()
    ));
    out.push_str(&f!(
        "{}\n",
        author_line(
            topic.author_name.as_deref(),
            topic.author_role,
            &topic.created_at
        )
    ));
    out.push_str(&f!(
        "{}: {} | {}: {}{}{}\n",
        "Views".green(),
        topic.views_count,
        "Replies".green(),
        topic.replies_count,
        if topic.is_pinned { " | pinned" } else { "" },
        if topic.is_locked {
            " | locked".red().to_string()
        } else {
            String::new()
        }
    ));
    out.push_str(&f!("{}\n\n", "=".repeat(80).bright_cyan()));
    out.push_str(&format_segments(&view.segments));

    for post in &view.posts {
        out.push_str(&f!("\n{}\n", "-".repeat(80).bright_black()));
        out.push_str(&f!(
            "{} {} {}\n",
            f!("#{}", post.post.id).yellow(),
            author_line(
                post.post.author_name.as_deref(),
                post.post.author_role,
                &post.post.created_at
            ),
            f!("♥ {}", post.post.likes_count).bright_red()
        ));
        out.push_str(&format_segments(&post.segments));
    }

    if topic.accepts_replies() {
        out.push_str(&f!(
            "\n  {}: {}\n",
            "Reply".green(),
            f!("forumhub reply {} \"<content>\"", topic.id).cyan()
        ));
    } else {
        out.push_str(&f!("\n  {}\n", "This topic is locked.".yellow()));
    }

    out
}
