//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Personal site - pages and a contact form that emails submissions
#[derive(Parser, Debug)]
#[command(name = "personal-site")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Validate configuration, templates and mail transport
    Check,

    /// Send a test email through the configured transport
    SendTestEmail(SendTestEmailArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the send-test-email command
#[derive(Parser, Debug)]
pub struct SendTestEmailArgs {
    /// Recipients (defaults to CONTACT_RECIPIENTS)
    pub recipients: Vec<String>,
}
