use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered in order of increasing precedence:
/// `config/default`, `config/{RUN_ENV}`, then environment variables with the
/// `BOOKIFY` prefix (`BOOKIFY_API__BASE_URL`, `BOOKIFY_AUTH__PROVIDER_URL`, ...).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BOOKIFY".to_string());

    let config_root = config_root();
    let default_path = config_root.join("config/default");
    let env_path = config_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

/// Resolves the directory that holds the `config/` tree.
///
/// Anchored on this crate's own manifest directory, captured at compile time,
/// so the result is the workspace root no matter which workspace member is
/// being run or tested. The runtime `CARGO_MANIFEST_DIR` points at the
/// *invoking* package and would resolve to the wrong directory for the
/// binary. When the baked-in path no longer holds a `config/` tree (an
/// installed binary on another machine), the current working directory is
/// used instead.
fn config_root() -> PathBuf {
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2) // go from crates/bookify_config to workspace root
        .map(Path::to_path_buf);

    match workspace_root {
        Some(root) if root.join("config").is_dir() => root,
        _ => PathBuf::from("."),
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` selects an
/// alternate file; otherwise `.env` in the working directory is used.
pub fn ensure_dotenv_loaded() {
    let dotenv_path =
        std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}
