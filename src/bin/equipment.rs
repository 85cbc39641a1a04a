#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use failure::{bail, format_err};

use inventario::catalog::Catalog;
use inventario::cli;
use inventario::ctx::Ctx;
use inventario::equipment::{self, EquipmentForm, EQUIPMENT_KINDS};
use inventario::messages::Equipment;

// flag, wire field name
const FIELD_FLAGS: &[(&str, &str)] = &[
    ("type", "tipoEquipo"),
    ("brand", "marca"),
    ("model", "modelo"),
    ("processor", "tipoProcesador"),
    ("speed", "velocidadProcesador"),
    ("ram", "memoriaRam"),
    ("ram-type", "tipoMemoriaRam"),
    ("disk-brand", "marcaDisco"),
    ("disk-model", "modeloDisco"),
    ("partition-c", "c"),
    ("partition-d", "d"),
    ("partition-e", "e"),
];

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    let app = cli::base_opts()
        .about("Lists, searches, exports, registers, updates and deletes equipment")
        .arg(
            Arg::with_name("search")
                .long("search")
                .takes_value(true)
                .help("Only show equipment matching this type, brand, model or processor"),
        )
        .arg(
            Arg::with_name("page")
                .long("page")
                .takes_value(true)
                .help("Which page to show, starting from 1"),
        )
        .arg(
            Arg::with_name("export")
                .long("export")
                .takes_value(true)
                .help("Write every matching piece of equipment to this csv file"),
        )
        .arg(
            Arg::with_name("delete")
                .long("delete")
                .takes_value(true)
                .help("Delete the equipment with this id before listing"),
        )
        .arg(
            Arg::with_name("register")
                .long("register")
                .conflicts_with_all(&["update", "delete"])
                .help("Register new equipment from the field flags"),
        )
        .arg(
            Arg::with_name("update")
                .long("update")
                .takes_value(true)
                .conflicts_with("delete")
                .help("Update the equipment with this id; fields not given are left as listed"),
        );

    FIELD_FLAGS.iter().fold(app, |app, (flag, field)| {
        app.arg(Arg::with_name(flag).long(flag).takes_value(true).help(field))
    })
}

fn apply_fields(form: &mut EquipmentForm, matches: &ArgMatches<'_>) {
    for (flag, _) in FIELD_FLAGS {
        let value = match matches.value_of(flag) {
            Some(value) => value.to_string(),
            None => continue,
        };
        match *flag {
            "type" => form.kind = value,
            "brand" => form.brand = value,
            "model" => form.model = value,
            "processor" => form.processor = value,
            "speed" => form.processor_speed = value,
            "ram" => form.ram = value,
            "ram-type" => form.ram_kind = value,
            "disk-brand" => form.disk_brand = value,
            "disk-model" => form.disk_model = value,
            "partition-c" => form.c = value,
            "partition-d" => form.d = value,
            "partition-e" => form.e = value,
            other => warn!("Ignoring unknown field flag {}", other),
        }
    }
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        let mut catalog: Catalog<'_, Equipment> = Catalog::new(&ctx);

        if matches.is_present("register") {
            let mut form = EquipmentForm::default();
            apply_fields(&mut form, &matches);
            if !equipment::register(&ctx, &form) {
                bail!("The equipment was not registered, types are {:?}", EQUIPMENT_KINDS);
            }
        }
        if let Some(id) = matches.value_of("update") {
            let id: i64 = id.parse()?;
            if !catalog.fetch() {
                bail!("Couldn't load equipment");
            }
            let mut form = catalog
                .find(id)
                .map(EquipmentForm::from_equipment)
                .ok_or_else(|| format_err!("There is no equipment {}", id))?;
            apply_fields(&mut form, &matches);
            if !equipment::update(&ctx, id, &form) {
                bail!("The equipment was not updated");
            }
        }

        if let Some(id) = matches.value_of("delete") {
            let id: i64 = id.parse()?;
            info!("Deleting equipment {}", id);
            if !catalog.delete(id) {
                catalog.fetch();
            }
        } else if !catalog.fetch() {
            bail!("Couldn't load equipment");
        }

        if let Some(term) = matches.value_of("search") {
            catalog.set_search(term);
        }
        if let Some(page) = matches.value_of("page") {
            let page: usize = page.parse()?;
            catalog.set_page(page.saturating_sub(1));
        }
        if let Some(path) = matches.value_of("export") {
            cli::export_to(path, |out| catalog.export(out))?;
        }

        println!("{}", catalog.to_plaintext()?);
        Ok(())
    })
}
