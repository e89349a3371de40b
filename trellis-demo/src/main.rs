mod catalog;
mod error;
mod page;
mod paths;

use std::fs::{self, File};
use std::path::PathBuf;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use trellis::TrellisConfig;

use crate::catalog::Catalog;
use crate::error::DemoError;
use crate::page::CoursePage;

/// Log level when `TRELLIS_LOG` is unset or unparsable.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn init_logging() -> Result<(), DemoError> {
    let level = std::env::var("TRELLIS_LOG")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| DemoError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(&path).map_err(|source| DemoError::Io {
        path: path.clone(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), file)
        .map_err(|e| DemoError::Logging(e.to_string()))
}

fn load_config() -> Result<TrellisConfig, DemoError> {
    match paths::config_file() {
        Some(path) => Ok(TrellisConfig::load_optional(path)?),
        None => Ok(TrellisConfig::default()),
    }
}

async fn run() -> Result<(), DemoError> {
    init_logging()?;
    let config = load_config()?;
    let catalog = Catalog::bundled()?;
    info!("loaded {} courses", catalog.courses.len());

    let page = CoursePage::new(config, catalog);
    page.interact().await;
    let html = webdom::to_html_pretty(&page.render());

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            fs::write(&path, html).map_err(|source| DemoError::Io {
                path: path.clone(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
