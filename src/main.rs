use clap::{Parser, Subcommand};
use compress_images::config::{self, CompressConfig, ErrorPolicy};
use compress_images::{compress, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("COMPRESS_IMAGES_RELEASE") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("COMPRESS_IMAGES_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "compress-images")]
#[command(about = "Downsize PNGs and re-encode them as web-sized JPEGs")]
#[command(long_about = "\
Downsize PNGs and re-encode them as web-sized JPEGs

Every file in the image directory whose name ends in .png (any case) is
decoded, shrunk to 1400px wide if it is wider, flattened to RGB, and written
next to the original as <name>.jpg at quality 80. Originals are kept.
Existing .jpg files with the same name are overwritten.

Run 'compress-images gen-config' for a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// Image directory (overrides source_dir from the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// TOML config file layered over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report broken images and continue instead of stopping
    #[arg(long, global = true)]
    keep_going: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every matching image (the default)
    Compress,
    /// List what would be converted without writing anything
    Check,
    /// Print a config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Compress);

    match command {
        Command::Compress => {
            let settings = resolve_settings(cli.config, cli.dir, cli.keep_going)?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_compress_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = compress::compress(&settings, Some(tx));
            // The sender is gone either way, so the printer drains and exits.
            let printed = join_printer(printer);
            let summary = result?;
            printed?;
            output::print_completion(&summary);
            if !summary.is_clean() {
                std::process::exit(1);
            }
        }
        Command::Check => {
            let settings = resolve_settings(cli.config, cli.dir, cli.keep_going)?;
            println!("==> Checking {}", settings.source_dir.display());
            let planned = compress::plan(&settings)?;
            output::print_plan(&planned);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Wait for the report printer; a panic there (e.g. a closed stdout) is an error.
fn join_printer(printer: std::thread::JoinHandle<()>) -> Result<(), Box<dyn std::error::Error>> {
    printer
        .join()
        .map_err(|_| "report printer stopped before the batch finished".into())
}

/// Stock defaults, then the config file, then CLI flags.
fn resolve_settings(
    config_path: Option<PathBuf>,
    dir: Option<PathBuf>,
    keep_going: bool,
) -> Result<CompressConfig, config::ConfigError> {
    let mut settings = config::load_config(config_path.as_deref())?;
    if let Some(dir) = dir {
        settings.source_dir = dir;
    }
    if keep_going {
        settings.on_error = ErrorPolicy::Continue;
    }
    Ok(settings)
}
