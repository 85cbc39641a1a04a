#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use failure::{bail, format_err, Error};

use inventario::cli;
use inventario::ctx::Ctx;
use inventario::editor::{AssignmentEditor, Navigation, RecordState};
use inventario::form::{ComponentField, DeviceField};
use inventario::reference::Selector;
use inventario::submit::Mode;

// flag, wire field name
const SCALAR_FLAGS: &[(&str, &str)] = &[
    ("serial", "numSerieEquipo"),
    ("ip", "ipAddress"),
    ("cpu-ip", "ipCpuRed"),
    ("date", "fechaAsignacion"),
    ("security", "idEquipoSeguridad"),
    ("security-serial", "numSerieEquipoSeg"),
];

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    let app = cli::base_opts()
        .about("Registers a new assignment, or updates an existing one with --id")
        .arg(
            Arg::with_name("id")
                .long("id")
                .takes_value(true)
                .help("Update this assignment instead of registering a new one"),
        )
        .arg(Arg::with_name("user").long("user").takes_value(true).help("User id"))
        .arg(Arg::with_name("equipment").long("equipment").takes_value(true).help("Equipment id"))
        .arg(
            Arg::with_name("component")
                .long("component")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A component as ID:SERIAL, may be repeated"),
        )
        .arg(
            Arg::with_name("device")
                .long("device")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("An external device as BRAND:DESCRIPTION:SERIAL, may be repeated"),
        )
        .arg(
            Arg::with_name("drop-component")
                .long("drop-component")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Remove the Nth component row (starting from 1) before adding any"),
        )
        .arg(
            Arg::with_name("drop-device")
                .long("drop-device")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Remove the Nth external device row (starting from 1) before adding any"),
        );

    SCALAR_FLAGS.iter().fold(app, |app, (flag, field)| {
        app.arg(
            Arg::with_name(flag)
                .long(flag)
                .takes_value(true)
                .help(field),
        )
    })
}

fn pick(selector: &Selector, raw: &str, what: &str) -> Result<inventario::reference::SelectOption, Error> {
    let id: i64 = raw.parse()?;
    match selector.option(id) {
        Some(option) => Ok(option.clone()),
        None => Err(format_err!(
            "No {} with id {} ({})",
            what,
            id,
            selector.empty_text().unwrap_or("not among the options")
        )),
    }
}

/// Row indexes to drop, highest first so earlier removals don't shift later ones.
fn drop_indexes(matches: &ArgMatches<'_>, flag: &str) -> Result<Vec<usize>, Error> {
    let mut indexes = matches
        .values_of(flag)
        .map(|values| values.map(|v| v.parse::<usize>()).collect::<Result<Vec<_>, _>>())
        .unwrap_or_else(|| Ok(vec![]))?;
    indexes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(indexes)
}

fn apply_rows(editor: &mut AssignmentEditor<'_>, matches: &ArgMatches<'_>) -> Result<(), Error> {
    for index in drop_indexes(matches, "drop-component")? {
        match editor.form().components().get(index.wrapping_sub(1)).map(|l| l.row_id) {
            Some(row_id) => {
                editor.remove_component_line(row_id);
            }
            None => warn!("There is no component row {}", index),
        }
    }
    for index in drop_indexes(matches, "drop-device")? {
        match editor.form().external_devices().get(index.wrapping_sub(1)).map(|l| l.row_id) {
            Some(row_id) => {
                editor.remove_device_line(row_id);
            }
            None => warn!("There is no external device row {}", index),
        }
    }

    for raw in matches.values_of("component").into_iter().flatten() {
        let mut parts = raw.splitn(2, ':');
        let (id, serial) = match (parts.next(), parts.next()) {
            (Some(id), Some(serial)) => (id, serial),
            _ => bail!("Components are given as ID:SERIAL, got {:?}", raw),
        };
        let index = match editor.form().components().last() {
            Some(line) if line.component_id.is_empty() && line.serial_number.is_empty() => {
                editor.form().components().len() - 1
            }
            _ => {
                editor.add_component_line();
                editor.form().components().len() - 1
            }
        };
        editor.set_component_line_field(index, ComponentField::ComponentId, id)?;
        editor.set_component_line_field(index, ComponentField::SerialNumber, serial)?;
    }

    for raw in matches.values_of("device").into_iter().flatten() {
        let parts: Vec<_> = raw.splitn(3, ':').collect();
        if parts.len() != 3 {
            bail!("External devices are given as BRAND:DESCRIPTION:SERIAL, got {:?}", raw);
        }
        let index = match editor.form().external_devices().last() {
            Some(line) if line.brand.is_empty() && line.description.is_empty() && line.serial_number.is_empty() => {
                editor.form().external_devices().len() - 1
            }
            _ => {
                editor.add_device_line();
                editor.form().external_devices().len() - 1
            }
        };
        editor.set_device_line_field(index, DeviceField::Brand, parts[0])?;
        editor.set_device_line_field(index, DeviceField::Description, parts[1])?;
        editor.set_device_line_field(index, DeviceField::SerialNumber, parts[2])?;
    }
    Ok(())
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        let mode = match matches.value_of("id") {
            Some(id) => Mode::Update(id.parse()?),
            None => Mode::Create,
        };
        let mut editor = AssignmentEditor::open(&ctx, mode);

        let record_failed = match editor.record_state() {
            RecordState::Failed(_) => true,
            _ => false,
        };
        if record_failed || !editor.reference().failures().is_empty() {
            info!("Retrying what failed to load");
            editor.retry();
        }
        for failed in editor.reference().failures() {
            warn!("Couldn't load {}, its selector has no options", failed);
        }

        if let Some(raw) = matches.value_of("user") {
            let option = pick(&editor.user_selector(), raw, "user")?;
            editor.set_user_selection(Some(&option));
        }
        if let Some(raw) = matches.value_of("equipment") {
            let option = pick(&editor.equipment_selector(), raw, "equipment")?;
            editor.set_equipment_selection(Some(&option));
        }
        for (flag, field) in SCALAR_FLAGS {
            if let Some(value) = matches.value_of(flag) {
                editor.set_scalar_field(field, value)?;
            }
        }
        apply_rows(&mut editor, &matches)?;

        match editor.submit() {
            Navigation::AssignmentList => Ok(()),
            Navigation::Stay => bail!("The assignment was not saved"),
        }
    })
}
