use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use layers::collect_features;
use layers::popup::file_url;
use map::MapDocument;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "classeur11.csv";
const DEFAULT_OUTPUT_NAME: &str = "carte_interactive.html";
const DEFAULT_LOGO: &str = "image/logo_atlas.jpg";

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds a searchable dialect-atlas map from a delimited table")]
struct Args {
    /// Input table (semicolon-delimited, UTF-8)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output HTML path (default: carte_interactive.html next to the input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Logo image overlaid on the map's top-left corner
    #[arg(long, default_value = DEFAULT_LOGO)]
    logo: PathBuf,

    /// Directory row image/audio references are resolved against
    /// (default: the working directory)
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Also write the collected features as pretty-printed GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Write the artifact without launching a browser
    #[arg(long)]
    no_open: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = real_main(Args::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    let assets_root = match args.assets_root {
        Some(dir) => dir,
        None => env::current_dir().map_err(|e| format!("working directory: {e}"))?,
    };

    let table = formats::DataTable::from_path(&args.input).map_err(|e| e.to_string())?;
    let report = collect_features(&table, &assets_root).map_err(|e| e.to_string())?;

    info!(
        "using coordinate columns {}/{}",
        report.coordinates.x, report.coordinates.y
    );
    for skip in &report.skipped {
        warn!("row {} skipped: {}", skip.index, skip.error);
    }
    info!(
        "collected {} features from {} rows",
        report.collection.len(),
        table.len()
    );

    if let Some(path) = &args.geojson {
        let payload = report
            .collection
            .to_geojson_string_pretty()
            .map_err(|e| format!("geojson: {e}"))?;
        fs::write(path, payload).map_err(|e| format!("write {}: {e}", path.display()))?;
        info!("wrote {}", path.display());
    }

    let document = MapDocument::new(report.collection).with_logo(assets_root.join(&args.logo));
    let html = document.render_html().map_err(|e| format!("render map: {e}"))?;

    let out_path = default_output_path(&args.input, args.out);
    fs::write(&out_path, html).map_err(|e| format!("write {}: {e}", out_path.display()))?;
    info!("wrote {}", out_path.display());

    if !args.no_open {
        let target = fs::canonicalize(&out_path)
            .map_err(|e| format!("resolve {}: {e}", out_path.display()))?;
        webbrowser::open(&file_url(&target)).map_err(|e| format!("open browser: {e}"))?;
    }

    Ok(())
}

/// The artifact lands next to the input unless an explicit path is given.
fn default_output_path(input: &Path, out: Option<PathBuf>) -> PathBuf {
    match out {
        Some(path) => path,
        None => match input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(DEFAULT_OUTPUT_NAME),
            _ => PathBuf::from(DEFAULT_OUTPUT_NAME),
        },
    }
}
