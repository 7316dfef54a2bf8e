//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the user's config dir
const APP_DIR: &str = "gdrive-mcp";

const PROJECT_FILES: [&str; 2] = ["gdrive-mcp.toml", ".gdrive-mcp.toml"];

/// Prefix of structured environment overrides (`GDRIVE_MCP_SERVER__PORT`)
const ENV_PREFIX: &str = "GDRIVE_MCP_";

/// Unprefixed variables honored for compatibility with existing deployments
const PLAIN_ENV_VARS: [&str; 5] = ["CLIENT_ID", "CLIENT_SECRET", "REFRESH_TOKEN", "PORT", "HOST"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GDRIVE_MCP_<SECTION>__<KEY>` environment variables
    /// 2. `CLIENT_ID`, `CLIENT_SECRET`, `REFRESH_TOKEN`, `PORT`, `HOST`
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./gdrive-mcp.toml` or `./.gdrive-mcp.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/gdrive-mcp/config.toml`
    /// 6. Default values
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Merging global config {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Merging project config {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            debug!("Merging explicit config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus environment, ignoring every config file (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    /// Load `./.env` into the process environment, if present.
    ///
    /// Variables already set in the environment win.
    pub fn load_dotenv() -> Option<PathBuf> {
        let path = Path::new(".env");
        if !path.exists() {
            return None;
        }
        dotenvy::from_path(path).ok().map(|_| path.to_path_buf())
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::raw().only(&PLAIN_ENV_VARS).map(map_plain_env))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/gdrive-mcp/config.toml` if set,
    /// otherwise the platform's config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX);
        println!("  [ENV  ] {}", PLAIN_ENV_VARS.join(", "));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

fn map_plain_env(key: &UncasedStr) -> Uncased<'_> {
    let mapped = match key.as_str().to_ascii_uppercase().as_str() {
        "CLIENT_ID" => "credentials.client_id",
        "CLIENT_SECRET" => "credentials.client_secret",
        "REFRESH_TOKEN" => "credentials.refresh_token",
        "PORT" => "server.port",
        "HOST" => "server.host",
        _ => return key.as_str().into(),
    };
    mapped.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", dir.display());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_project_file_and_env_layers() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "gdrive-mcp.toml",
                r#"
[server]
port = 9000

[batch]
max_concurrency = 5
"#,
            )?;
            jail.set_env("CLIENT_ID", "env-client");
            jail.set_env("GDRIVE_MCP_BATCH__MAX_CONCURRENCY", "3");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.batch.max_concurrency, 3);
            assert_eq!(config.credentials.client_id.as_deref(), Some("env-client"));
            Ok(())
        });
    }

    #[test]
    fn test_plain_port_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(".gdrive-mcp.toml", "[server]\nport = 9000\n")?;
            jail.set_env("PORT", "7000");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.server.port, 7000);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("gdrive-mcp.toml", "[search]\ndefault_page_size = 20\n")?;
            jail.create_file("custom.toml", "[search]\ndefault_page_size = 30\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.search.default_page_size, 30);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_outside_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.toml");
        std::fs::write(
            &path,
            "[drive]\napi_base_url = \"http://127.0.0.1:9999/drive/v3\"\n",
        )
        .unwrap();

        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;
            assert_eq!(config.drive.api_base_url, "http://127.0.0.1:9999/drive/v3");
            assert_eq!(config.drive.token_url, crate::drive::DEFAULT_TOKEN_URL);
            Ok(())
        });
    }

    // dirs only honors XDG_CONFIG_HOME on Linux
    #[cfg(target_os = "linux")]
    #[test]
    fn test_global_file_is_read() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let global = ConfigLoader::global_config_path().expect("config dir");
            std::fs::create_dir_all(global.parent().expect("parent")).expect("mkdir");
            std::fs::write(&global, "[usage]\nmax_files_scanned = 42\n").expect("write");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.usage.max_files_scanned, 42);
            Ok(())
        });
    }

    #[test]
    fn test_load_without_files_ignores_project_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("gdrive-mcp.toml", "[server]\nport = 9000\n")?;
            jail.set_env("REFRESH_TOKEN", "1//abc");

            let config = ConfigLoader::load_without_files().map_err(|e| *e)?;
            assert_eq!(config.server.port, 8081);
            assert_eq!(config.credentials.refresh_token.as_deref(), Some("1//abc"));
            Ok(())
        });
    }
}
