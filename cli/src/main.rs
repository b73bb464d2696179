use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use gallery::config_codec;
use gallery::image_url::normalize_image_url;
use gallery::launch_state::LaunchState;
use gallery::legacy_codec;
use gallery::share_link::{ShareOutput, MAX_SHARE_LINK_LEN};

mod config_file;

use config_file::{load_config, write_config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the share link fragment for a gallery config.
    Encode {
        /// Gallery config JSON file (defaults to the sample gallery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use the old uncompressed link format
        #[arg(long, default_value_t = false)]
        legacy: bool,
    },
    /// Print the gallery config in a share link or fragment as JSON.
    Decode {
        /// A share link, or just the part after the '#'
        fragment_or_url: String,
    },
    /// Print the share link for a gallery config.
    Link {
        /// Public URL the app is hosted at
        #[arg(short, long)]
        base_url: String,

        /// Gallery config JSON file (defaults to the sample gallery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print iframe markup embedding a gallery config.
    Embed {
        /// Public URL the app is hosted at
        #[arg(short, long)]
        base_url: String,

        /// Gallery config JSON file (defaults to the sample gallery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the URL an image will actually be loaded from.
    Normalize { url: String },
    /// Append an image to a gallery config.
    AddImage {
        /// Image URL
        #[arg(short, long)]
        url: String,

        /// Gallery config JSON file (defaults to the sample gallery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to write the updated config (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Fragments never contain `#` or `://`, so anything that does is a whole link.
fn launch_state_for(fragment_or_url: &str) -> LaunchState {
    if fragment_or_url.contains('#') || fragment_or_url.contains("://") {
        LaunchState::from_url(fragment_or_url)
    } else {
        LaunchState::from_url_hash(fragment_or_url)
    }
}

fn warn_about_share_output(output: &ShareOutput) {
    if output.link.ends_with('#') {
        log::warn!("The config couldn't be encoded, so this link won't show it.");
    }
    if output.too_long {
        log::warn!(
            "URL too long ({} chars). Some hosts only support URLs up to ~{MAX_SHARE_LINK_LEN} characters, try removing some images.",
            output.link_len()
        );
    }
    if output.local_base_url {
        log::warn!(
            "The base URL is on this machine. Deploy the app to a public host and use its URL for embeds to work elsewhere."
        );
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Command::Encode { config, legacy } => {
            let config = load_config(config.as_ref())?;
            let fragment = if legacy {
                legacy_codec::encode(&config)?
            } else {
                config_codec::encode(&config)
            };
            if fragment.is_empty() {
                return Err(anyhow!("Unable to encode config"));
            }
            println!("{fragment}");
        }
        Command::Decode { fragment_or_url } => {
            let state = launch_state_for(&fragment_or_url);
            log::info!("Embed mode: {}.", state.embed_mode);
            println!("{}", serde_json::to_string_pretty(&state.config)?);
        }
        Command::Link { base_url, config } => {
            let output = ShareOutput::new(&load_config(config.as_ref())?, base_url);
            warn_about_share_output(&output);
            println!("{}", output.link);
        }
        Command::Embed { base_url, config } => {
            let output = ShareOutput::new(&load_config(config.as_ref())?, base_url);
            warn_about_share_output(&output);
            println!("{}", output.embed_code);
        }
        Command::Normalize { url } => {
            println!("{}", normalize_image_url(url));
        }
        Command::AddImage {
            url,
            config,
            output,
        } => {
            let mut config = load_config(config.as_ref())?;
            let Some(id) = config.add_image(&url) else {
                return Err(anyhow!("Image URL is empty"));
            };
            log::info!("Added image {id}.");
            write_config(&config, output.as_ref())?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        println!("error: {}", err);
        process::exit(1);
    }
}
