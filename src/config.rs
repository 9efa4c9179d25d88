use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "Full Pokedex Cleaned v2.csv";
pub const DEFAULT_LOG_LINES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub asset_dir: PathBuf,
    pub log_lines: usize,
    pub start: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            asset_dir: PathBuf::from("."),
            log_lines: DEFAULT_LOG_LINES,
            start: None,
        }
    }
}

impl AppConfig {
    /// Reads `DEX_*` variables; call after the `.env` files have been loaded.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env_path("DEX_DATA_PATH").unwrap_or(defaults.data_path),
            asset_dir: env_path("DEX_ASSET_DIR").unwrap_or(defaults.asset_dir),
            log_lines: env::var("DEX_LOG_LINES")
                .ok()
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_LOG_LINES)
                .max(10),
            start: env::var("DEX_START")
                .ok()
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty()),
        }
    }

    /// Applies `--data <path>` / `--data=<path>` from the command line.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(path) = parse_data_arg(args) {
            self.data_path = path;
        }
        self
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}

pub fn parse_data_arg<I, S>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--data=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--data" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
