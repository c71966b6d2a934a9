//! Entry point and command-line interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use flagkit::config::{self, AppConfig};
use flagkit::diagnostics::{inspect_auth, FileTokenStore};
use flagkit::flags::{self, DisplaySize};
use flagkit::logging;
use flagkit::probe;
use flagkit::robots::CrawlerPolicy;
use flagkit::AppError;

#[derive(Parser)]
#[command(name = "flagkit")]
#[command(version)]
#[command(about = "Country flag image resolution and frontend developer tools")]
struct Cli {
    /// Config file (default: <config_dir>/flagkit/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to <data_dir>/flagkit/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a country code to flag image URLs
    Flag {
        /// Country code, e.g. "GH" (malformed codes resolve to a placeholder flag)
        #[arg(value_name = "CODE")]
        code: String,

        /// Display size in px (16, 20, 24, 32, 40, 48, 64)
        #[arg(short, long, default_value = "20")]
        size: DisplaySize,

        /// Rounded corners (cosmetic)
        #[arg(long)]
        rounded: bool,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the CDN width used for a display size
    Width {
        #[arg(value_name = "SIZE")]
        size: u32,
    },

    /// Print robots.txt for the site
    Robots {
        /// Site URL (overrides config)
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Report whether a local auth token is stored
    AuthStatus {
        /// Token file (overrides config)
        #[arg(long, value_name = "PATH")]
        token_file: Option<PathBuf>,
    },

    /// Check a URL against the remote image allow-list
    CheckHost {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Send HEAD requests for a resolved flag's URLs
    Probe {
        #[arg(value_name = "CODE")]
        code: String,

        #[arg(short, long, default_value = "20")]
        size: DisplaySize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_file.then(config::log_dir);
    let _guard = logging::init_logging(cli.verbose, log_dir.as_deref());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    debug!(?config, "Effective config");

    match cli.command {
        Commands::Flag {
            code,
            size,
            rounded,
            format,
        } => {
            config.validate()?;
            let resolver = config.resolver()?;
            let flag = flags::flag_image(&resolver, &code, size, rounded);

            match format {
                OutputFormat::Text => {
                    println!("url:          {}", flag.image.url);
                    println!("high-density: {}", flag.image.high_density_url);
                    println!("alt:          {}", flag.image.alt);
                    println!("size:         {}x{} ({})", size.px(), flag.height, flag.image.width);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&flag)?),
                OutputFormat::Html => println!("{}", flag.to_html()),
            }
        }

        Commands::Width { size } => {
            let width = flags::resolve_width_px(size)?;
            println!("{}", width.px());
        }

        Commands::Robots { site_url } => {
            let site_url = site_url.unwrap_or_else(|| config.site_url.clone());
            print!("{}", CrawlerPolicy::for_site(&site_url).render());
        }

        Commands::AuthStatus { token_file } => {
            let path = token_file.unwrap_or_else(|| config.token_path());
            let status = inspect_auth(&FileTokenStore::new(path))?;
            println!("{}", status.summary());
        }

        Commands::CheckHost { url } => {
            if config.is_trusted_image(&url) {
                println!("trusted: {url}");
            } else {
                println!("not trusted: {url}");
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Probe { code, size } => {
            let image = config.resolver()?.resolve_for_display(&code, size);
            info!(url = %image.url, "Probing flag CDN");
            let report = probe::probe(&image)?;

            for check in [&report.standard, &report.high_density] {
                match (check.status, &check.error) {
                    (Some(status), _) => println!("{status} {}", check.url),
                    (None, Some(error)) => println!("ERR {} ({error})", check.url),
                    (None, None) => println!("??? {}", check.url),
                }
            }
            if !report.all_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
