use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{CommandFactory as _, Parser, error::ErrorKind};
use tracing_subscriber::filter::LevelFilter;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Render the TSSH release wallpaper and install it into a root filesystem.
#[derive(Parser, Debug)]
#[command(name = "ts-release", version)]
struct Cli {
    /// Target name shown in the title.
    target_name: String,

    /// Root filesystem directory that receives the artifacts.
    rootfs_dir: PathBuf,

    /// Use a local image instead of searching Wallhaven.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Wallhaven search query.
    #[arg(long)]
    query: Option<String>,

    /// Wallhaven category bitmask.
    #[arg(long)]
    categories: Option<String>,

    /// Wallhaven purity bitmask.
    #[arg(long)]
    purity: Option<String>,

    /// Wallhaven result ordering.
    #[arg(long)]
    sorting: Option<String>,

    /// Print the computed layout as JSON on stdout.
    #[arg(long)]
    dump_layout: bool,

    /// Log debug diagnostics to stderr.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn search_params(&self) -> ts_release::SearchParams {
        let mut params = ts_release::SearchParams::default();
        let overrides = [
            (&mut params.query, &self.query),
            (&mut params.categories, &self.categories),
            (&mut params.purity, &self.purity),
            (&mut params.sorting, &self.sorting),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
        params
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.target_name.is_empty() {
        Cli::command()
            .error(ErrorKind::InvalidValue, "target name must not be empty")
            .exit();
    }
    if !cli.rootfs_dir.is_dir() {
        Cli::command()
            .error(
                ErrorKind::InvalidValue,
                format!("rootfs '{}' is not a directory", cli.rootfs_dir.display()),
            )
            .exit();
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    let build_id = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    tracing::debug!(%build_id, target = %cli.target_name, "starting release image build");

    if cli.dump_layout {
        let geometry = ts_release::preview_layout(&cli.target_name, &build_id)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&geometry).context("serialize layout")?
        );
    }

    let canvas = match &cli.background {
        Some(path) => {
            let background = image::open(path)
                .with_context(|| format!("open background '{}'", path.display()))?;
            ts_release::render(Some(&background), &cli.target_name, &build_id)?
        }
        None => {
            let transport = ts_release::HttpTransport::new(HTTP_TIMEOUT)?;
            let source = ts_release::BackgroundSource::new(transport, cli.search_params());
            ts_release::generate(&source, &cli.target_name, &build_id)?
        }
    };

    let paths = ts_release::install(&cli.rootfs_dir, &canvas, &build_id)?;
    eprintln!("wrote {}", paths.splash_bmp.display());
    eprintln!("wrote {}", paths.background_jpg.display());
    eprintln!("wrote {}", paths.build_file.display());
    Ok(())
}
