use crate::client::Transport;
use crate::prelude::{eprintln, println, *};
use crate::Context;
use colored::Colorize;
use forumhub_core::models::{format_timestamp, AuthResponse};

#[derive(Debug, clap::Parser)]
#[command(name = "auth")]
#[command(about = "Log in or create an account")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Log in with email and password
    #[clap(name = "login")]
    Login(LoginOptions),

    /// Create a new account
    #[clap(name = "register")]
    Register(RegisterOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct LoginOptions {
    pub email: String,

    #[clap(env = "FORUMHUB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RegisterOptions {
    pub username: String,

    pub email: String,

    #[clap(env = "FORUMHUB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<T: Transport>(app: App, ctx: &Context<T>) -> Result<()> {
    if ctx.verbose {
        eprintln!("Running auth command...");
    }

    let (data, json) = match app.command {
        Commands::Login(options) => (
            ctx.client.login(&options.email, &options.password).await?,
            options.json,
        ),
        Commands::Register(options) => (
            ctx.client
                .register(&options.username, &options.email, &options.password)
                .await?,
            options.json,
        ),
    };

    if json {
        println!("{}", to_json(&data)?);
    } else {
        print!("{}", format_auth_text(&data));
    }

    Ok(())
}

fn format_auth_text(data: &AuthResponse) -> String {
    let user = &data.user;
    let mut out = String::new();

    out.push_str(&f!(
        "\n{} {} ({})\n",
        "Signed in as".green(),
        user.username.bright_white().bold(),
        user.email
    ));
    out.push_str(&f!(
        "    {}: {} | {}: {} | {}: {} | {}: {}\n",
        "ID".green(),
        user.id.to_string().bright_yellow(),
        "Role".green(),
        user.role.badge(),
        "Posts".green(),
        user.posts_count,
        "Joined".green(),
        format_timestamp(&user.created_at).bright_black()
    ));
    out.push_str(&f!(
        "\n{}:\n  {}\n",
        "To post as this user".bright_white().bold(),
        f!("export FORUMHUB_USER_ID={}", user.id).cyan()
    ));

    out
}
