pub mod create;
pub mod list;
pub mod read;

use crate::client::Transport;
use crate::prelude::{eprintln, println, *};
use crate::Context;

#[derive(Debug, clap::Parser)]
#[command(name = "topics")]
#[command(about = "List, read and create topics")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List topics in server order
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Read a topic and its replies
    #[clap(name = "read")]
    Read(read::ReadOptions),

    /// Start a new topic
    #[clap(name = "create")]
    Create(create::CreateOptions),
}

pub async fn run<T: Transport>(app: App, ctx: &Context<T>) -> Result<()> {
    if ctx.verbose {
        eprintln!("Running topics command...");
    }

    match app.command {
        Commands::List(options) => list::handler(options, ctx).await,
        Commands::Read(options) => read::handler(options, ctx).await,
        Commands::Create(options) => create::handler(options, ctx).await,
    }
}

pub use read::{print_topic, topic_view, TopicView};
