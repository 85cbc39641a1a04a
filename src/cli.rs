use crate::config::Config;
use crate::session::FileStorage;
use crate::{AUTHOR, VERSION};

use std::fs;

use clap::{App, Arg, ArgMatches};
use failure::Error;

/// The config file used when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "inventario.toml";

/// Create the base set of clap options common to all cli commands
pub fn base_opts<'a, 'b>() -> App<'a, 'b> {
    App::new("inventario")
        .version(VERSION)
        .author(AUTHOR)
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("Path to configuration file"),
        )
}

/// Load whichever config `--config` names, or the defaults if that file doesn't exist.
pub fn config(matches: &ArgMatches<'_>) -> Result<Config, Error> {
    Config::load_or_default(matches.value_of("config").unwrap_or(DEFAULT_CONFIG_FILE))
}

/// Open the session storage the config points at.
pub fn session_storage(cfg: &Config) -> Result<FileStorage, Error> {
    let path = cfg.session_path()?;
    debug!("Using session storage at {:?}", &path);
    FileStorage::open(path)
}

/// Export into memory and write the result to `path`. Nothing is written when nothing was
/// exported, so an empty search doesn't leave an empty file behind.
pub fn export_to<F>(path: &str, export: F) -> Result<usize, Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<usize, Error>,
{
    let mut buffer = vec![];
    let count = export(&mut buffer)?;
    if count > 0 {
        fs::write(path, &buffer)?;
        info!("Exported {} rows to {}", count, path);
    }
    Ok(count)
}

/// Setup logging for inventario. This sets the log level to INFO if unset and configures the
/// logging facade favoured by inventario's clis.
pub fn init_logging() {
    if ::std::env::var_os("RUST_LOG").is_none() {
        ::std::env::set_var("RUST_LOG", "INFO");
    }
    pretty_env_logger::init();
}

/// Run a given closure with logging configured, and deal with any errors. This allows you to have
/// a fairly simple main, eg:
///
/// ```
/// use inventario::cli::run;
///
/// fn main() {
///     run(|| {
///         // Do stuff here, including using the ? operator with reckless abandon.
///         // ...
///         // You must however return Ok(())
///         Ok(())
///     });
/// }
/// ```
pub fn run(main: fn() -> Result<(), ::failure::Error>) {
    init_logging();
    if let Err(e) = main() {
        error!("Error running inventario");
        error!("{:?}", e);
        if ::std::env::var("RUST_BACKTRACE").is_ok() {
            error!("{:?}", e.backtrace());
        }
        ::std::process::exit(1);
    }
}
