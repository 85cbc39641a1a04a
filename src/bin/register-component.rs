use clap::{App, Arg};
use failure::bail;

use inventario::cli;
use inventario::components::{self, ComponentForm, COMPONENT_KINDS, KEYBOARD_LANGUAGES};
use inventario::ctx::Ctx;

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts()
        .about("Registers a component: a monitor, mouse, keyboard or IP phone")
        .arg(
            Arg::with_name("type")
                .long("type")
                .takes_value(true)
                .required(true)
                .possible_values(COMPONENT_KINDS)
                .help("tipoComponente"),
        )
        .arg(Arg::with_name("brand").long("brand").takes_value(true).help("marcaComponente"))
        .arg(
            Arg::with_name("monitor-model")
                .long("monitor-model")
                .takes_value(true)
                .help("Required for monitors"),
        )
        .arg(
            Arg::with_name("phone-model")
                .long("phone-model")
                .takes_value(true)
                .help("Required for IP phones"),
        )
        .arg(
            Arg::with_name("language")
                .long("language")
                .takes_value(true)
                .possible_values(KEYBOARD_LANGUAGES)
                .help("Required for keyboards"),
        )
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        let value = |flag: &str| matches.value_of(flag).unwrap_or_default().to_string();
        let form = ComponentForm {
            kind: value("type"),
            brand: value("brand"),
            monitor_model: value("monitor-model"),
            phone_model: value("phone-model"),
            keyboard_language: value("language"),
        };
        if !components::register(&ctx, &form) {
            bail!("The component was not registered");
        }
        Ok(())
    })
}
