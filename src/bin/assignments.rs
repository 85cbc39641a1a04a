#[macro_use]
extern crate log;

use clap::{App, Arg};
use failure::format_err;

use inventario::cli;
use inventario::ctx::Ctx;
use inventario::listing::AssignmentListing;
use inventario::messages::AssignmentKind;

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts()
        .about("Lists, searches, exports and deletes assignments")
        .arg(
            Arg::with_name("kind")
                .long("kind")
                .takes_value(true)
                .possible_values(&["equipos", "teclados", "mouse"])
                .help("Only list assignments of equipment, keyboards or mice"),
        )
        .arg(
            Arg::with_name("export")
                .long("export")
                .takes_value(true)
                .help("Write every matching assignment to this csv file"),
        )
        .arg(
            Arg::with_name("search")
                .long("search")
                .takes_value(true)
                .help("Only show assignments matching this user name, area, department or id"),
        )
        .arg(
            Arg::with_name("page")
                .long("page")
                .takes_value(true)
                .help("Which page to show, starting from 1"),
        )
        .arg(
            Arg::with_name("delete")
                .long("delete")
                .takes_value(true)
                .help("Delete the assignment with this id before listing"),
        )
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let storage = cli::session_storage(&cfg)?;
        let ctx = Ctx::create(&cfg, &storage)?;

        let mut listing = match matches.value_of("kind") {
            Some(kind) => AssignmentListing::of_kind(&ctx, kind.parse::<AssignmentKind>()?),
            None => AssignmentListing::new(&ctx),
        };
        if let Some(id) = matches.value_of("delete") {
            let id: i64 = id.parse()?;
            info!("Deleting assignment {}", id);
            if !listing.delete(id) {
                // Still show whatever is there
                listing.fetch();
            }
        } else if !listing.fetch() {
            return Err(format_err!("Couldn't load assignments"));
        }

        if let Some(term) = matches.value_of("search") {
            listing.set_search(term);
        }
        if let Some(page) = matches.value_of("page") {
            let page: usize = page.parse()?;
            listing.set_page(page.saturating_sub(1));
        }

        if let Some(path) = matches.value_of("export") {
            cli::export_to(path, |out| listing.export(out))?;
        }

        println!("{}", listing.to_plaintext()?);
        Ok(())
    })
}
