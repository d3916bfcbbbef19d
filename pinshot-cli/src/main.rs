//! Pinshot CLI
//!
//! Command-line front end for uploading images to the Pinata pinning
//! service and printing their content-addressed display URLs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pinshot_ipfs::{PinataClient, PinataConfig};
use pinshot_uploader::{PathPicker, Uploader};

/// Pinshot - content-addressed image uploads
#[derive(Parser)]
#[command(name = "pinshot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and print its gateway URL
    Upload {
        /// Path to the image file
        path: PathBuf,

        /// Filename to record with the pin (defaults to a derived name)
        #[arg(short, long)]
        name: Option<String>,

        /// MIME type (defaults to a guess from the file extension)
        #[arg(short, long)]
        mime: Option<String>,

        /// Gateway host for the display URL (overrides PINATA_GATEWAY)
        #[arg(long)]
        gateway: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pinshot=debug,info"
    } else {
        "pinshot=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Upload {
            path,
            name,
            mime,
            gateway,
        } => cmd_upload(path, name, mime, gateway).await,
    }
}

/// Upload a local image through the pick-and-upload flow
async fn cmd_upload(
    path: PathBuf,
    name: Option<String>,
    mime: Option<String>,
    gateway: Option<String>,
) -> Result<()> {
    let mut config = PinataConfig::from_env();
    if let Some(gateway) = gateway {
        config.gateway_host = gateway;
    }

    if config.jwt.is_empty() {
        println!(
            "{}",
            "⚠️  PINATA_JWT is not set; the service will reject the upload.".yellow()
        );
    }

    let mut picker = PathPicker::new(&path);
    if let Some(mime) = mime {
        picker = picker.with_mime_type(mime);
    }

    let mut uploader = Uploader::new(picker, PinataClient::with_config(config));
    if let Some(name) = name {
        uploader = uploader.with_file_name(name);
    }

    println!("{} {}", "📤 Uploading".cyan().bold(), path.display());

    match uploader.pick_and_upload().await {
        Ok(Some(result)) => {
            println!("{}", "✅ Upload successful!".green().bold());
            println!("   CID: {}", result.ipfs_hash);
            println!("   URL: {}", result.display_url.cyan());
            Ok(())
        }
        Ok(None) => {
            println!("{}", "Selection cancelled.".yellow());
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", "❌".red(), err);
            Err(err.into())
        }
    }
}
