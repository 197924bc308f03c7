use crate::client::Transport;
use crate::prelude::{println, *};
use crate::present::terminal_safe;
use crate::Context;
use colored::Colorize;
use forumhub_core::stats::{compute_stats, ForumStats};

#[derive(Debug, clap::Args, Clone)]
pub struct StatsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handler<T: Transport>(options: StatsOptions, ctx: &Context<T>) -> Result<()> {
    let stats = stats_data(ctx).await?;

    if options.json {
        println!("{}", to_json(&stats)?);
    } else {
        print_stats(&stats);
    }

    Ok(())
}

/// Fetch forums and topics concurrently and aggregate them
pub async fn stats_data<T: Transport>(ctx: &Context<T>) -> Result<ForumStats> {
    let (forums, topics) =
        futures::try_join!(ctx.client.get_forums(), ctx.client.get_topics(None))?;

    Ok(compute_stats(&forums, &topics))
}

fn print_stats(stats: &ForumStats) {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Metric".bold().cyan(), "Value".bold().cyan()]);

    table.add_row(prettytable::row!["Forums", stats.forums]);
    table.add_row(prettytable::row!["Topics", stats.topics]);
    table.add_row(prettytable::row!["Posts", stats.posts]);
    table.add_row(prettytable::row!["Pinned topics", stats.pinned_topics]);
    table.add_row(prettytable::row!["Locked topics", stats.locked_topics]);
    table.add_row(prettytable::row!["Total views", stats.total_views]);
    table.add_row(prettytable::row![
        "Busiest forum",
        terminal_safe(stats.busiest_forum.as_deref().unwrap_or("-")).bright_white()
    ]);
    let most_viewed = match &stats.most_viewed_topic {
        Some(topic) => f!(
            "#{} {} ({} views)",
            topic.id,
            terminal_safe(&topic.title),
            topic.views
        ),
        None => "-".to_string(),
    };
    table.add_row(prettytable::row!["Most viewed topic", most_viewed.bright_white()]);

    println!("\n{}\n", "Forum statistics".bright_cyan().bold());
    table.printstd();
}
