use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use wspotify::{cli, config, error, types::Group};

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
    /// Authorize with the Spotify accounts service (PKCE)
    Auth,

    /// Show an album with all of its tracks
    Album { id: String },

    /// Show several albums
    Albums {
        #[clap(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// List an album's tracks
    Tracks {
        id: String,
        #[clap(flatten)]
        page: PageOptions,
    },

    /// Show an artist
    Artist {
        id: String,
        /// Also list related artists
        #[clap(long)]
        related: bool,
    },

    /// List an artist's albums
    ArtistAlbums {
        id: String,
        /// Album group(s) to include; can be repeated
        #[clap(long = "group", action = ArgAction::Append)]
        groups: Vec<Group>,
        #[clap(flatten)]
        page: PageOptions,
    },

    /// List albums saved in your library
    SavedAlbums {
        #[clap(flatten)]
        page: PageOptions,
    },

    /// List new releases featured in Spotify
    NewReleases {
        #[clap(flatten)]
        page: PageOptions,
    },

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PageOptions {
    /// Fetch every item
    #[clap(long, conflicts_with = "limit")]
    all: bool,

    /// Maximum number of items
    #[clap(long, default_value_t = 20)]
    limit: u32,

    /// Index of the first item
    #[clap(long, default_value_t = 0)]
    offset: u32,
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

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let result = match cli.command {
        Command::Auth => cli::auth(&config).await,
        Command::Album { id } => cli::album(&config, &id).await,
        Command::Albums { ids } => cli::albums(&config, &ids).await,
        Command::Tracks { id, page } => {
            cli::tracks(&config, &id, cli::limit(page.all, page.limit), page.offset).await
        }
        Command::Artist { id, related } => cli::artist(&config, &id, related).await,
        Command::ArtistAlbums { id, groups, page } => {
            cli::artist_albums(
                &config,
                &id,
                &groups,
                cli::limit(page.all, page.limit),
                page.offset,
            )
            .await
        }
        Command::SavedAlbums { page } => {
            cli::saved_albums(&config, cli::limit(page.all, page.limit), page.offset).await
        }
        Command::NewReleases { page } => {
            cli::new_releases(&config, cli::limit(page.all, page.limit), page.offset).await
        }
        Command::Completions(_) => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
