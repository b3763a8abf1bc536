use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server (default)
    Serve(ServeArgs),
    /// Show version information
    Version,
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Base URL of the Dkron API (overrides `upstream.base_url`)
    #[arg(short, long)]
    pub upstream: Option<String>,
}
