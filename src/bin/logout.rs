#[macro_use]
extern crate log;

use clap::App;

use inventario::cli;
use inventario::notify::{ConsoleNotifier, Notice, Notify};
use inventario::session::Session;

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts().about("Forgets the stored session")
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;

        let mut storage = cli::session_storage(&cfg)?;
        Session::clear(&mut storage)?;
        info!("Cleared session at {:?}", cfg.session_path()?);
        ConsoleNotifier.notify(Notice::Success("Sesión cerrada".into()));

        Ok(())
    })
}
