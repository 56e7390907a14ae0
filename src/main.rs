use clap::Parser;
use snapsize::codec::RustCodec;
use snapsize::process;
use snapsize::settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snapsize")]
#[command(about = "Batch-resize fresh images found in configured directories")]
#[command(long_about = "\
Batch-resize fresh images found in configured directories

Sweeps each configured path (non-recursive), skips directories, symlinks,
stale files, prior outputs, and non-images, and writes a proportionally
shrunk JPEG copy of everything else alongside the original:

  photo.png  →  photo_small.png   (JPEG content, configured suffix)

Settings file:

  paths = [\"/srv/camera/%Y-%m-%d\", \"/srv/inbox\"]   # strftime ok
  max_age = 60                                        # minutes

  [new_image]
  suffix = \"_small\"
  max_width = 1920
  max_height = 1080
  jpeg_quality = 80")]
#[command(version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    config: PathBuf,

    /// Log every filter decision and resize (debug level)
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match sweep(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn sweep(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(&cli.config)?;
    let codec = RustCodec::new();
    let stats = process::run(&codec, &settings)?;
    info!(
        resized = stats.resized,
        skipped = stats.skipped,
        missing_paths = stats.missing_paths,
        "sweep complete"
    );
    Ok(())
}

/// Install the log sink. `--verbose` lowers the floor to debug; otherwise
/// `RUST_LOG` decides, defaulting to info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
