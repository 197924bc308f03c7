use crate::client::Transport;
use crate::prelude::{println, *};
use crate::topics::list::topic_table;
use crate::Context;
use colored::Colorize;
use forumhub_core::models::Topic;
use forumhub_core::search::{parse_query, search_topics};
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// Text to look for in titles, bodies and author names
    pub query: String,

    /// Only search this forum
    #[arg(short, long)]
    pub category: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<Topic>,
}

pub async fn handler<T: Transport>(options: SearchOptions, ctx: &Context<T>) -> Result<()> {
    let data = search_data(&options, ctx).await?;

    if options.json {
        println!("{}", to_json(&data)?);
        return Ok(());
    }

    println!(
        "\nFound {} topic(s) matching {}:\n",
        data.results.len().to_string().bold(),
        f!("\"{}\"", options.query.trim()).bright_white()
    );
    if !data.results.is_empty() {
        let rows: Vec<&Topic> = data.results.iter().collect();
        topic_table(&rows).printstd();
    }

    Ok(())
}

/// Fetch topics and filter them locally. A blank query fails before fetching.
pub async fn search_data<T: Transport>(
    options: &SearchOptions,
    ctx: &Context<T>,
) -> Result<SearchOutput> {
    let query = parse_query(&options.query)?;
    let topics = ctx.client.get_topics(options.category).await?;

    let results = search_topics(&topics, &query)?
        .into_iter()
        .cloned()
        .collect();

    Ok(SearchOutput { query, results })
}
