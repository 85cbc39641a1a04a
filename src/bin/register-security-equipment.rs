use clap::{App, Arg};
use failure::bail;

use inventario::cli;
use inventario::ctx::Ctx;
use inventario::equipment::{self, SecurityEquipmentForm};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts()
        .about("Registers security equipment, eg a UPS or a voltage regulator")
        .arg(Arg::with_name("type").long("type").takes_value(true).help("tipo"))
        .arg(Arg::with_name("brand").long("brand").takes_value(true).help("marca"))
        .arg(Arg::with_name("model").long("model").takes_value(true).help("modelo"))
        .arg(Arg::with_name("capacity").long("capacity").takes_value(true).help("capacidad"))
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        let value = |flag: &str| matches.value_of(flag).unwrap_or_default().to_string();
        let form = SecurityEquipmentForm {
            kind: value("type"),
            brand: value("brand"),
            model: value("model"),
            capacity: value("capacity"),
        };
        if !equipment::register_security_equipment(&ctx, &form) {
            bail!("The security equipment was not registered");
        }
        Ok(())
    })
}
