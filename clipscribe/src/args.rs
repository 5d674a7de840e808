use std::path::PathBuf;

use clap::Parser;

/// clipscribe recording, upload and transcription service
#[derive(Debug, Parser)]
#[command(name = "clipscribe", about = "Upload audio recordings to object storage and transcribe them")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "clipscribe.toml", env = "CLIPSCRIBE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CLIPSCRIBE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
