use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tenglish_indexer::IndexerConfig;
use tenglish_ri::RiParams;

pub const DEFAULT_CONFIG_FILE: &str = "tenglish.toml";
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Optional on-disk configuration. Every field falls back to the
/// conventional layout under `./data`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub notes_dir: Option<PathBuf>,
    pub embeddings_dir: Option<PathBuf>,
    pub ri: RiParams,
}

/// Resolve the effective corpus configuration.
///
/// Precedence, lowest to highest: built-in defaults under `./data`,
/// then `tenglish.toml` in the working directory (or the file named by
/// `--config`, which must exist), then the `TENGLISH_NOTES_DIR` and
/// `TENGLISH_EMBEDDINGS_DIR` environment variables.
pub fn resolve(config_path: Option<&Path>) -> Result<IndexerConfig> {
    let file = match config_path {
        Some(path) => Some(load_file(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            default.exists().then(|| load_file(default)).transpose()?
        }
    };
    let config = apply(
        file,
        std::env::var_os("TENGLISH_NOTES_DIR").map(PathBuf::from),
        std::env::var_os("TENGLISH_EMBEDDINGS_DIR").map(PathBuf::from),
    );
    validate(&config)?;
    Ok(config)
}

/// Reject parameter combinations the vector builders cannot honor.
fn validate(config: &IndexerConfig) -> Result<()> {
    let ri = &config.ri;
    if ri.dimension == 0 {
        bail!("ri.dimension must be positive");
    }
    if ri.nonzeros == 0 || ri.nonzeros > ri.dimension {
        bail!(
            "ri.nonzeros must be between 1 and ri.dimension ({}), got {}",
            ri.dimension,
            ri.nonzeros
        );
    }
    Ok(())
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn apply(
    file: Option<ConfigFile>,
    env_notes: Option<PathBuf>,
    env_embeddings: Option<PathBuf>,
) -> IndexerConfig {
    let mut config = IndexerConfig::under(DEFAULT_DATA_ROOT);
    if let Some(file) = file {
        if let Some(dir) = file.notes_dir {
            config.notes_dir = dir;
        }
        if let Some(dir) = file.embeddings_dir {
            config.embeddings_dir = dir;
        }
        config.ri = file.ri;
    }
    if let Some(dir) = env_notes {
        config.notes_dir = dir;
    }
    if let Some(dir) = env_embeddings {
        config.embeddings_dir = dir;
    }
    config
}
