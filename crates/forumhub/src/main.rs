#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

use crate::client::{ApiClient, HttpTransport, Transport};
use crate::config::ForumConfig;

mod auth;
mod client;
mod config;
mod error;
mod forums;
mod like;
mod prelude;
mod present;
mod render;
mod reply;
mod search;
mod stats;
mod topics;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse and post to a forumhub discussion forum from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Forum API base URL (overrides FORUMHUB_API_URL)
    #[clap(long, global = true)]
    api_url: Option<String>,

    /// Id of the logged in user (overrides FORUMHUB_USER_ID)
    #[clap(long, global = true)]
    user_id: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "FORUMHUB_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Log in or create an account
    Auth(crate::auth::App),

    /// List or create forums
    Forums(crate::forums::App),

    /// List, read and create topics
    Topics(crate::topics::App),

    /// Reply to a topic
    Reply(crate::reply::ReplyOptions),

    /// Like or unlike a post
    Like(crate::like::LikeOptions),

    /// Search topics by title, content or author
    Search(crate::search::SearchOptions),

    /// Show aggregate forum statistics
    Stats(crate::stats::StatsOptions),

    /// Render forum markdown from a file or stdin
    Render(crate::render::RenderOptions),
}

/// Everything a command needs: the API client, built once, and the
/// resolved configuration.
pub struct Context<T = HttpTransport> {
    pub client: ApiClient<T>,
    pub config: ForumConfig,
    pub verbose: bool,
}

impl<T: Transport> Context<T> {
    pub fn new(transport: T, config: ForumConfig, verbose: bool) -> Self {
        Self {
            client: ApiClient::new(transport),
            config,
            verbose,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let config = ForumConfig::from_env()?
        .with_overrides(app.global.api_url.clone(), app.global.user_id);
    log::debug!("Using API base {}", config.base_url);

    let transport = HttpTransport::new(&config)?;
    let ctx = Context::new(transport, config, app.global.verbose);

    match app.command {
        SubCommands::Auth(sub_app) => crate::auth::run(sub_app, &ctx).await,
        SubCommands::Forums(sub_app) => crate::forums::run(sub_app, &ctx).await,
        SubCommands::Topics(sub_app) => crate::topics::run(sub_app, &ctx).await,
        SubCommands::Reply(options) => crate::reply::handler(options, &ctx).await,
        SubCommands::Like(options) => crate::like::handler(options, &ctx).await,
        SubCommands::Search(options) => crate::search::handler(options, &ctx).await,
        SubCommands::Stats(options) => crate::stats::handler(options, &ctx).await,
        SubCommands::Render(options) => crate::render::handler(options, ctx.verbose),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
