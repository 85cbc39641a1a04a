use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use failure::Error;

pub const DEFAULT_API_BASE: &str = "https://backendsistemainventario.onrender.com/api";

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The name of the session file, relative to the user's home directory, used when the config
/// doesn't say otherwise.
pub const SESSION_FILE_NAME: &str = ".inventario-session.json";

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Default)]
pub struct Config {
    inventario: Option<InventarioConfig>,
    session: Option<SessionConfig>,
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Default)]
pub struct InventarioConfig {
    api_base: Option<String>,
    page_size: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    path: PathBuf,
}

pub fn get_home() -> Result<PathBuf, Error> {
    dirs::home_dir().ok_or_else(|| format_err!("Couldn't find HOME"))
}

impl Config {
    pub fn from_file(path: &str) -> Result<Config, Error> {
        let mut fh = File::open(path)?;
        let mut contents = String::new();
        fh.read_to_string(&mut contents)?;

        Config::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(body: &str) -> Result<Config, Error> {
        match toml::from_str(body) {
            Ok(config) => Ok(config),
            Err(e) => Err(format_err!("Couldn't parse config: {}", e)),
        }
    }

    /// Load the config at `path`, falling back to the defaults only if there is no such file. The
    /// clis all work without a config file, but one that exists and doesn't parse is an error.
    pub fn load_or_default(path: &str) -> Result<Config, Error> {
        match Config::from_file(path) {
            Ok(cfg) => Ok(cfg),
            Err(e) => match e.downcast_ref::<io::Error>() {
                Some(io_error) if io_error.kind() == io::ErrorKind::NotFound => {
                    info!("No config at {}, proceeding with defaults", path);
                    Ok(Config::default())
                }
                _ => Err(e),
            },
        }
    }

    pub fn api_base(&self) -> &str {
        self.inventario
            .as_ref()
            .and_then(|i| i.api_base.as_ref())
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn page_size(&self) -> usize {
        match self.inventario.as_ref().and_then(|i| i.page_size) {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(size) => size,
        }
    }

    /// Returns the path to the session storage file.
    pub fn session_path(&self) -> Result<PathBuf, Error> {
        match self.session {
            Some(ref session) => Ok(session.path.clone()),
            None => Ok(get_home()?.join(SESSION_FILE_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_file("inventario.toml.example").unwrap();

        assert_eq!(config.api_base(), "https://inventario.example.org/api");
        assert_eq!(config.page_size(), 25);
        assert_eq!(
            config.session_path().unwrap(),
            PathBuf::from("/var/lib/inventario/session.json")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let config = Config::from_str(
            r#"
[inventario]
page_size = 0
"#,
        ).unwrap();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_session_path_is_required_in_session_table() {
        let error = Config::from_str(
            r#"
[session]
"#,
        ).unwrap_err();
        assert!(format!("{}", error).contains("missing field `path`"))
    }

    #[test]
    fn test_invalid_page_size() {
        let error = Config::from_str(
            r#"
[inventario]
page_size = "lots"
"#,
        ).unwrap_err();
        assert!(format!("{}", error).starts_with("Couldn't parse config"))
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("this/file/does/not/exist.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = crate::test_helpers::tempdir();
        let path = dir.path().join("inventario.toml");
        std::fs::write(
            &path,
            r#"
[inventario]
api_base = "https://staging.local/api"
page_size = "ten"
"#,
        ).unwrap();

        let error = Config::load_or_default(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{}", error).starts_with("Couldn't parse config"))
    }
}
