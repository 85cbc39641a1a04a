#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use failure::{bail, format_err};

use inventario::catalog::Catalog;
use inventario::cli;
use inventario::ctx::Ctx;
use inventario::messages::User;
use inventario::users::{self, UserForm};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts()
        .about("Lists, searches, exports, registers, updates and deletes users")
        .arg(
            Arg::with_name("search")
                .long("search")
                .takes_value(true)
                .help("Only show users matching this name, area or department"),
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
                .help("Write every matching user to this csv file"),
        )
        .arg(
            Arg::with_name("delete")
                .long("delete")
                .takes_value(true)
                .help("Delete the user with this id before listing"),
        )
        .arg(
            Arg::with_name("register")
                .long("register")
                .conflicts_with_all(&["update", "delete"])
                .help("Register a new user from --name, --area and --department"),
        )
        .arg(
            Arg::with_name("update")
                .long("update")
                .takes_value(true)
                .conflicts_with("delete")
                .help("Update the user with this id; fields not given are left as they are"),
        )
        .arg(Arg::with_name("name").long("name").takes_value(true).help("NombreUsuario"))
        .arg(Arg::with_name("area").long("area").takes_value(true).help("Area"))
        .arg(
            Arg::with_name("department")
                .long("department")
                .takes_value(true)
                .help("Departamento"),
        )
}

fn apply_fields(form: &mut UserForm, matches: &ArgMatches<'_>) {
    if let Some(name) = matches.value_of("name") {
        form.name = name.to_string();
    }
    if let Some(area) = matches.value_of("area") {
        form.area = area.to_string();
    }
    if let Some(department) = matches.value_of("department") {
        form.department = department.to_string();
    }
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        if matches.is_present("register") {
            let mut form = UserForm::default();
            apply_fields(&mut form, &matches);
            if !users::register(&ctx, &form) {
                bail!("The user was not registered");
            }
        }
        if let Some(id) = matches.value_of("update") {
            let id: i64 = id.parse()?;
            let mut form = users::load(&ctx, id).ok_or_else(|| format_err!("Couldn't load user {}", id))?;
            apply_fields(&mut form, &matches);
            if !users::update(&ctx, id, &form) {
                bail!("The user was not updated");
            }
        }

        let mut catalog: Catalog<'_, User> = Catalog::new(&ctx);
        if let Some(id) = matches.value_of("delete") {
            let id: i64 = id.parse()?;
            info!("Deleting user {}", id);
            if !catalog.delete(id) {
                catalog.fetch();
            }
        } else if !catalog.fetch() {
            bail!("Couldn't load users");
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
