use bagit::core::BagError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "bagit")]
#[command(about = "Maintain and verify BagIt manifests")]
#[command(version)]
struct Cli {
    /// Bag root directory
    #[arg(short, long, global = true, default_value = ".")]
    bag: PathBuf,
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate payload manifests (and tag manifests)
    Manifest {
        /// default, sha1, md5, sha256 or sha512
        #[arg(short, long)]
        algorithm: Option<String>,
    },
    /// Regenerate tag manifests for the tracked tag files
    Tagmanifest,
    /// Track a tag file, copying it into the bag with --from
    AddTag {
        /// Path relative to the bag root
        path: PathBuf,
        /// Copy the content from this file
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Stop tracking a tag file, keeping it on disk
    RemoveTag {
        /// Path relative to the bag root
        path: PathBuf,
    },
    /// Stop tracking a tag file and delete it
    DeleteTag {
        /// Path relative to the bag root
        path: PathBuf,
    },
    /// Verify every recorded checksum
    Verify,
}

fn main() -> Result<(), BagError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = cli::Context::open(&cli.bag, cli.config.as_deref()).and_then(|ctx| match cli.command {
        Commands::Manifest { algorithm } => cli::manifest::run(&ctx, algorithm),
        Commands::Tagmanifest => cli::tagmanifest::run(&ctx),
        Commands::AddTag { path, from } => cli::tag::add(&ctx, &path, from.as_deref()),
        Commands::RemoveTag { path } => cli::tag::remove(&ctx, &path),
        Commands::DeleteTag { path } => cli::tag::delete(&ctx, &path),
        Commands::Verify => cli::verify::run(&ctx),
    });

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", bagit::format_error_with_help(e));
    }

    result
}
