use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Inspect and reconcile APK package keys",
    arg_required_else_help = true
)]
pub struct Args {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Machine readable output
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse keys and print their fields
    Parse {
        /// Keys of the form host/repo/arch/name-version.apk
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print the https URL of a key
    Url {
        key: String,
    },

    /// Derive the status digest of a package checksum
    Digest {
        /// Hex-encoded checksum, or an APKINDEX `Q1...` value with --index
        checksum: String,

        /// Treat the checksum as an APKINDEX `C:` field
        #[arg(long)]
        index: bool,
    },

    /// List supported architectures
    Archs,

    /// Generate default config
    #[command(name = "defconfig")]
    DefConfig,

    /// Dry-run requests read as JSON lines and print the responses
    Reconcile {
        /// Read requests from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
