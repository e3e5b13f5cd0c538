use clap::{Parser, Subcommand};
use image_docking::imaging::ResizeFilter;
use image_docking::{compose, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; clap needs a &'static str
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "image-docking")]
#[command(about = "Dock the images of a directory side by side, two at a time")]
#[command(long_about = "\
Dock the images of a directory side by side, two at a time

Images directly inside INPUT (jpg, jpeg, png, gif; any case) are sorted by
file name and taken in pairs. Each pair is scaled to a common height and
written as one JPEG into OUTPUT. With an odd count, the last image is paired
with a white block of its own size.

  input/                 output/
  ├── 01.png  ┐
  ├── 02.jpg  ┘  ──→     ├── combined_image_0001.jpg
  ├── 03.gif  ┐
  ├── 04.png  ┘  ──→     ├── combined_image_0002.jpg
  └── 05.jpg  ─ blank ─→ └── combined_image_0003.jpg

Sorting is by raw bytes: 'B.png' comes before 'a.png', and '10.png' before
'9.png'. Zero-pad numbers to keep them in numeric order.

Run 'image-docking gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite every pair and write the results
    Compose {
        /// Directory holding the source images
        input: PathBuf,
        /// Directory for combined_image_NNNN.jpg files (created if missing)
        output: PathBuf,
        /// Config file (default: config.toml in INPUT, if present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// JPEG quality, 1-100
        #[arg(long)]
        quality: Option<u32>,
        /// Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
        #[arg(long)]
        filter: Option<ResizeFilter>,
    },
    /// Show how INPUT would be paired without writing anything
    Check {
        /// Directory holding the source images
        input: PathBuf,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compose {
            input,
            output,
            config: config_file,
            quality,
            filter,
        } => {
            let overrides = config::Overrides { quality, filter };
            let site_config = config::load_config(&input, config_file.as_deref(), &overrides)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_run_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = compose::run_with_backend(
                &image_docking::imaging::RustBackend::new(),
                &input,
                &output,
                &site_config,
                Some(tx),
                None,
            );
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            result?;
        }
        Command::Check { input, json } => {
            let plan = compose::plan(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan(&plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags raise the level from `warn`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
