use clap::{Parser, Subcommand};

/// BPOOL — admin gateway for the school-transport booking platform
#[derive(Parser)]
#[command(name = "bpool-admin", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the admin gateway server
    Serve {
        /// Port to bind (overrides BPOOL_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
