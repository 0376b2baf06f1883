use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lastsync::{cli, config, error, warning};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true, // sync flags or a subcommand, never both
  subcommand_negates_reqs = true,
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    sync: SyncOptions,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API and cache the token
    Auth,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct SyncOptions {
    /// The Spotify ID of the playlist to populate and play
    #[clap(long, required = true)]
    pub playlist: Option<String>,

    /// The device ID of the place to play the playlist
    #[clap(long)]
    pub device: Option<String>,

    /// The username for the Last.fm account
    #[clap(long, required = true)]
    pub last_fm_username: Option<String>,

    /// Number of days back to sync
    #[clap(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Number of days back the sync window ends
    #[clap(long, default_value_t = 0)]
    pub days_end: u32,

    /// Do not play the playlist
    #[clap(long)]
    pub disable_playback: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("{}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Auth) => cli::auth().await,
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        None => {
            let opt = cli.sync;
            let (Some(playlist), Some(username)) = (opt.playlist, opt.last_fm_username) else {
                error!("--playlist and --last-fm-username are required");
            };

            let args = cli::SyncArgs {
                playlist,
                device: opt.device,
                username,
                days: opt.days,
                days_end: opt.days_end,
                disable_playback: opt.disable_playback,
            };

            if let Err(e) = cli::sync(args).await {
                error!("Sync failed: {}", e);
            }
        }
    }
}
