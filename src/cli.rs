use std::io::{self, BufRead};

use clap::{ArgAction, Parser, Subcommand};
use log::info;
use serde_json::Value;
use ytm_api::clients::errors::Result;
use ytm_api::queries::{self, ArtistSection, ConfigBuilder};

#[derive(Parser, Debug)]
#[command(name = "ytm-api")]
#[command(
    version,
    about = "Fetch data from the YouTube Music API as JSON, made to be piped into jq, yt-dlp and other tools",
    long_about = None,
    disable_version_flag = true
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Read extra positional arguments from standard input, one per line,
    /// stopping at the first blank line or end of input
    #[arg(short, long, global = true)]
    pipe: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search every term and print the combined results
    Search {
        /// Terms to search for, one query each
        terms: Vec<String>,

        /// Keep only the results in the "Top result" category
        #[arg(short, long)]
        top_result_only: bool,
    },
    /// Fetch full artist profiles by channel ID
    Artist {
        /// Artist channel IDs
        ids: Vec<String>,
    },
    /// List every album of the given artists
    Albums {
        /// Artist channel IDs
        ids: Vec<String>,
    },
    /// List every song of the given artists
    Songs {
        /// Artist channel IDs
        ids: Vec<String>,
    },
    /// List every single (and EP) of the given artists
    Singles {
        /// Artist channel IDs
        ids: Vec<String>,
    },
}

/// Parses the command line (and standard input in pipe mode), dispatches to
/// the matching query operation and prints the JSON result.
pub async fn run() -> Result<()> {
    let mut cli = Cli::parse();

    // Pipe mode appends stdin tokens to the original arguments and parses
    // the rebuilt list once.
    if cli.pipe {
        let mut argv: Vec<String> = std::env::args().collect();
        argv.extend(pipe_tokens(io::stdin().lock())?);
        cli = Cli::parse_from(argv);
    }

    let result = dispatch(cli).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

async fn dispatch(cli: Cli) -> Result<Value> {
    // No subcommand means nothing to do, which prints as JSON null.
    let Some(command) = cli.command else {
        return Ok(Value::Null);
    };

    info!("Building config ...");
    let config = ConfigBuilder::new().build()?;

    match command {
        Commands::Search {
            terms,
            top_result_only,
        } => queries::search(&config, &terms, top_result_only).await,
        Commands::Artist { ids } => queries::artist(&config, &ids).await,
        Commands::Albums { ids } => {
            queries::artist_items(&config, &ids, ArtistSection::Albums).await
        }
        Commands::Songs { ids } => queries::artist_items(&config, &ids, ArtistSection::Songs).await,
        Commands::Singles { ids } => {
            queries::artist_items(&config, &ids, ArtistSection::Singles).await
        }
    }
}

/// Reads one argument token per line, trimming surrounding whitespace,
/// until the first blank line or end of input.
fn pipe_tokens(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut tokens = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() {
            break;
        }
        tokens.push(token.to_string());
    }

    Ok(tokens)
}
