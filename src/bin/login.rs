#[macro_use]
extern crate log;

use clap::App;
use rpassword;

use inventario::cli;
use inventario::client::{ClientError, InventoryClient};
use inventario::notify::{ConsoleNotifier, Notice, Notify};
use inventario::session::Session;
use std::io::{self, Write};

fn cli_opts<'a, 'b>() -> App<'a, 'b> {
    cli::base_opts().about("Logs into the inventory service and stores the session")
}

fn main() {
    inventario::cli::run(|| {
        let matches = cli_opts().get_matches();
        let cfg = cli::config(&matches)?;

        let client = InventoryClient::new(cfg.api_base())?;
        let mut username = String::new();
        println!("Logging into {}", cfg.api_base());
        print!("usuario: ");
        io::stdout().flush()?;
        io::stdin().read_line(&mut username)?;
        let password = rpassword::prompt_password_stdout("contraseña: ")?;

        let login = match client.login(username.trim_end(), &password) {
            Ok(login) => login,
            Err(e) => {
                let text = match e.downcast_ref::<ClientError>() {
                    Some(ClientError::InvalidLogin) => "Usuario o contraseña incorrectos".to_string(),
                    _ => e.to_string(),
                };
                ConsoleNotifier.notify(Notice::error("Error de autenticación", &text));
                return Err(e);
            }
        };

        let mut storage = cli::session_storage(&cfg)?;
        let session = Session::store_login(&mut storage, &login)?;
        info!("Session saved to {:?}", cfg.session_path()?);
        ConsoleNotifier.notify(Notice::Success(format!("¡Bienvenido, {}! Inicio de sesión exitoso", session.greeting_name())));

        Ok(())
    })
}
