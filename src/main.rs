use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use toptify::{cli, config, error, types::AuthRequest, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to Spotify
    Login,

    /// Show your top artists
    Artists(TopOptions),

    /// Show your top tracks
    Tracks(TopOptions),

    /// Show the signed-in profile
    Profile,

    /// Log out and clear the local session
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Number of items to show (the API caps a page at 50)
    #[clap(long, default_value_t = 20)]
    pub limit: u32,

    /// Index of the first item to show
    #[clap(long, default_value_t = 0)]
    pub offset: u32,

    /// Ranking window: short_term (~4 weeks), medium_term (~6 months) or long_term
    #[clap(long, default_value = "medium_term", value_parser = utils::parse_time_range)]
    pub time_range: utils::TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => {
            let login_state: Arc<Mutex<Option<AuthRequest>>> = Arc::new(Mutex::new(None));
            cli::login(Arc::clone(&login_state)).await;
        }
        Command::Artists(opt) => cli::top_artists(opt.limit, opt.offset, opt.time_range).await,
        Command::Tracks(opt) => cli::top_tracks(opt.limit, opt.offset, opt.time_range).await,
        Command::Profile => cli::profile().await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
