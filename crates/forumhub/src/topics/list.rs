use crate::client::Transport;
use crate::prelude::{println, *};
use crate::present::terminal_safe;
use crate::Context;
use colored::Colorize;
use forumhub_core::models::{format_timestamp, Topic};
use forumhub_core::pagination::{calculate_pagination, page_info, PageInfo};
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Only topics in this forum
    #[arg(short, long)]
    pub category: Option<u64>,

    /// Number of topics per page
    #[arg(short, long, env = "FORUMHUB_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct TopicListOutput {
    pub topics: Vec<Topic>,
    pub pagination: PageInfo,
}

pub async fn handler<T: Transport>(options: ListOptions, ctx: &Context<T>) -> Result<()> {
    let data = list_topics_data(&options, ctx).await?;

    if options.json {
        println!("{}", to_json(&data)?);
    } else {
        print!("{}", format_topic_list(&data));
    }

    Ok(())
}

/// Fetch topics and cut out the requested page. Server order is kept.
pub async fn list_topics_data<T: Transport>(
    options: &ListOptions,
    ctx: &Context<T>,
) -> Result<TopicListOutput> {
    let topics = ctx.client.get_topics(options.category).await?;

    let (start, end) = calculate_pagination(topics.len(), options.page, options.limit)
        .map_err(|e| eyre!("{}", e))?;

    let command = match options.category {
        Some(category) => f!("forumhub topics list --category {category}"),
        None => "forumhub topics list".to_string(),
    };

    Ok(TopicListOutput {
        pagination: page_info(topics.len(), options.page, options.limit, &command),
        topics: topics[start..end].to_vec(),
    })
}

/// A single table row's worth of topic flags
pub fn topic_flags(topic: &Topic) -> String {
    let mut flags = Vec::new();
    if topic.is_pinned {
        flags.push("pinned");
    }
    if topic.is_locked {
        flags.push("locked");
    }
    flags.join(",")
}

pub fn topic_table(topics: &[&Topic]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Title".bold().cyan(),
        "Author".bold().cyan(),
        "Replies".bold().cyan(),
        "Views".bold().cyan(),
        "Flags".bold().cyan(),
        "Updated".bold().cyan()
    ]);

    for topic in topics {
        table.add_row(prettytable::row![
            topic.id.to_string().bright_yellow(),
            terminal_safe(&topic.title).bright_white(),
            terminal_safe(topic.author_name.as_deref().unwrap_or("unknown"))
                .bright_magenta(),
            topic.replies_count,
            topic.views_count,
            topic_flags(topic).yellow(),
            format_timestamp(&topic.updated_at).bright_black()
        ]);
    }

    table
}

fn format_topic_list(data: &TopicListOutput) -> String {
    let info = &data.pagination;
    let mut out = f!(
        "\n{} {} topic(s) (page {} of {}):\n\n",
        "Found".green(),
        info.total_items.to_string().bold(),
        info.current_page,
        info.total_pages
    );

    if data.topics.is_empty() {
        out.push_str(&f!("{}\n", "No topics on this page.".yellow()));
        return out;
    }

    let rows: Vec<&Topic> = data.topics.iter().collect();
    out.push_str(&topic_table(&rows).to_string());

    if let Some(next) = &info.next_page_command {
        out.push_str(&f!("\n  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &info.prev_page_command {
        out.push_str(&f!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }
    out.push_str(&f!(
        "\n  {}: {}\n",
        "Read a topic".green(),
        "forumhub topics read <id>".cyan()
    ));

    out
}
