#[macro_use]
extern crate log;

use clap::App;
use rpassword;

use inventario::admin::AdminForm;
use inventario::cli;
use inventario::client::InventoryClient;
use inventario::notify::{ConsoleNotifier, Notice, Notify};
use std::io::{self, Write};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts().about("Creates a new administrator account")
}

fn prompt(label: &str) -> Result<String, failure::Error> {
    let mut answer = String::new();
    print!("{}: ", label);
    io::stdout().flush()?;
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim_end().to_string())
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;
        let client = InventoryClient::new(cfg.api_base())?;

        println!("Registering an administrator at {}", cfg.api_base());
        let form = AdminForm {
            name: prompt("nombre")?,
            username: prompt("usuario")?,
            password: rpassword::prompt_password_stdout("contraseña: ")?,
            confirmation: rpassword::prompt_password_stdout("confirmar contraseña: ")?,
        };
        let registration = match form.registration() {
            Ok(registration) => registration,
            Err(e) => {
                ConsoleNotifier.notify(Notice::Validation(e.to_string()));
                return Err(e.into());
            }
        };

        match client.register_admin(&registration) {
            Ok(()) => {
                info!("Registered administrator {}", registration.usuario);
                ConsoleNotifier.notify(Notice::Success(
                    "El administrador se ha registrado correctamente.".into(),
                ));
                Ok(())
            }
            Err(e) => {
                ConsoleNotifier.notify(Notice::error(
                    "Error en el registro",
                    "No se pudo registrar el administrador",
                ));
                Err(e)
            }
        }
    })
}
