use failure::Error;

use crate::catalog::{any_contains, report, Entry, Texts};
use crate::client::InventoryApi;
use crate::ctx::Ctx;
use crate::formatting::or_missing;
use crate::messages::{User, UserPayload};
use crate::notify::Notice;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub area: String,
    pub department: String,
}

#[derive(Debug, Serialize)]
pub struct UserExport {
    #[serde(rename = "ID")]
    id: Option<i64>,
    #[serde(rename = "Nombre completo")]
    name: String,
    #[serde(rename = "Área")]
    area: String,
    #[serde(rename = "Departamento")]
    department: String,
}

impl Entry for User {
    type Row = UserRow;
    type Export = UserExport;

    const TEXTS: Texts = Texts {
        title: "USUARIOS",
        load_failed: "No se pudieron cargar los usuarios. Intente nuevamente.",
        deleted: "Usuario eliminado correctamente",
        delete_failed: "No se pudo eliminar el usuario",
    };
    const TEMPLATE: &'static str = USERS_TEMPLATE;

    fn fetch(api: &dyn InventoryApi) -> Result<Vec<User>, Error> {
        api.users()
    }

    fn delete(api: &dyn InventoryApi, id: i64) -> Result<(), Error> {
        api.delete_user(id)
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        any_contains(
            &[self.name.as_deref(), self.area.as_deref(), self.department.as_deref()],
            needle,
        )
    }

    fn row(&self) -> UserRow {
        UserRow {
            id: self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            name: or_missing(self.name.as_deref()),
            area: or_missing(self.area.as_deref()),
            department: or_missing(self.department.as_deref()),
        }
    }

    fn export_row(&self) -> UserExport {
        UserExport {
            id: self.id,
            name: or_missing(self.name.as_deref()),
            area: or_missing(self.area.as_deref()),
            department: or_missing(self.department.as_deref()),
        }
    }
}

#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormError {
    #[fail(display = "El nombre del usuario es requerido")]
    MissingName,
    #[fail(display = "El área es requerida")]
    MissingArea,
    #[fail(display = "El departamento es requerido")]
    MissingDepartment,
}

/// The register/update user form. Every field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub area: String,
    pub department: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> UserForm {
        UserForm {
            name: user.name.clone().unwrap_or_default(),
            area: user.area.clone().unwrap_or_default(),
            department: user.department.clone().unwrap_or_default(),
        }
    }

    /// Every problem with the form, not only the first.
    pub fn errors(&self) -> Vec<UserFormError> {
        let mut errors = vec![];
        if self.name.trim().is_empty() {
            errors.push(UserFormError::MissingName);
        }
        if self.area.trim().is_empty() {
            errors.push(UserFormError::MissingArea);
        }
        if self.department.trim().is_empty() {
            errors.push(UserFormError::MissingDepartment);
        }
        errors
    }

    pub fn payload(&self, id: Option<i64>) -> Result<UserPayload, Vec<UserFormError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(UserPayload {
            id,
            name: self.name.trim().to_string(),
            area: self.area.trim().to_string(),
            department: self.department.trim().to_string(),
        })
    }
}

fn validated(ctx: &Ctx, form: &UserForm, id: Option<i64>) -> Option<UserPayload> {
    match form.payload(id) {
        Ok(payload) => Some(payload),
        Err(errors) => {
            let text: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            info!("User form rejected: {:?}", errors);
            ctx.notify(Notice::Validation(text.join(". ")));
            None
        }
    }
}

/// Register a new user. Returns whether it was saved.
pub fn register(ctx: &Ctx, form: &UserForm) -> bool {
    let payload = match validated(ctx, form, None) {
        Some(payload) => payload,
        None => return false,
    };
    report(
        ctx,
        ctx.api().create_user(&payload),
        "El usuario ha sido registrado exitosamente en el sistema.",
        (
            "Error al registrar usuario",
            "No se pudo registrar el usuario. Por favor, intenta de nuevo.",
        ),
    )
}

/// Fetch a user into a form for editing.
pub fn load(ctx: &Ctx, id: i64) -> Option<UserForm> {
    match ctx.api().user(id) {
        Ok(user) => Some(UserForm::from_user(&user)),
        Err(e) => {
            error!("Error loading user {}: {}", id, e);
            ctx.notify(Notice::error(
                "Error de conexión",
                "No se pudo cargar la información del usuario. Intente nuevamente.",
            ));
            None
        }
    }
}

pub fn update(ctx: &Ctx, id: i64, form: &UserForm) -> bool {
    let payload = match validated(ctx, form, Some(id)) {
        Some(payload) => payload,
        None => return false,
    };
    report(
        ctx,
        ctx.api().update_user(&payload),
        "La información del usuario se ha actualizado correctamente.",
        (
            "Error al actualizar usuario",
            "No se pudo actualizar la información. Por favor, intenta de nuevo.",
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::test_helpers::{self, FakeApi};

    fn form() -> UserForm {
        UserForm {
            name: " Marta Ríos ".into(),
            area: "Compras".into(),
            department: "Administración".into(),
        }
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let form = UserForm {
            area: "  ".into(),
            ..Default::default()
        };
        assert_eq!(
            form.errors(),
            vec![
                UserFormError::MissingName,
                UserFormError::MissingArea,
                UserFormError::MissingDepartment
            ]
        );
    }

    #[test]
    fn test_register_sends_trimmed_payload() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());

        assert!(register(&ctx, &form()));
        let written = api.written();
        assert_eq!(written[0].0, "create_user");
        assert_eq!(
            written[0].1,
            json!({"NombreUsuario": "Marta Ríos", "Area": "Compras", "Departamento": "Administración"})
        );
        assert_eq!(
            notices.last(),
            Some(Notice::Success("El usuario ha sido registrado exitosamente en el sistema.".into()))
        );
    }

    #[test]
    fn test_invalid_form_is_never_sent() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let form = UserForm {
            name: "Marta".into(),
            ..Default::default()
        };

        assert!(!register(&ctx, &form));
        assert!(api.written().is_empty());
        assert_eq!(
            notices.last(),
            Some(Notice::Validation("El área es requerida. El departamento es requerido".into()))
        );
    }

    #[test]
    fn test_failed_register_notifies() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        api.fail_call("create_user");

        assert!(!register(&ctx, &form()));
        assert_eq!(
            notices.last(),
            Some(Notice::error(
                "Error al registrar usuario",
                "No se pudo registrar el usuario. Por favor, intenta de nuevo."
            ))
        );
    }

    #[test]
    fn test_load_then_update() {
        let (ctx, api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut form = load(&ctx, 7).unwrap();
        assert_eq!(form.name, "Ana Torres");

        form.department = "Redes".into();
        assert!(update(&ctx, 7, &form));
        assert_eq!(
            api.written()[0],
            (
                "update_user",
                json!({"idUsuario": 7, "NombreUsuario": "Ana Torres", "Area": "TI", "Departamento": "Redes"})
            )
        );
    }

    #[test]
    fn test_load_unknown_user() {
        let (ctx, _api, notices) = test_helpers::ctx(FakeApi::new());
        assert!(load(&ctx, 99).is_none());
        assert!(notices.last().unwrap().is_error());
    }

    #[test]
    fn test_catalog_search_and_delete() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let mut users: Catalog<'_, User> = Catalog::new(&ctx);
        assert!(users.fetch());
        assert_eq!(users.filtered().len(), 3);

        users.set_search("finanzas");
        assert_eq!(users.page(), vec![UserRow {
            id: "8".into(),
            name: "Luis Mora".into(),
            area: "Finanzas".into(),
            department: "Sin datos".into(),
        }]);

        assert!(users.delete(8));
        assert_eq!(api.calls("users"), 2);
        assert!(users.filtered().is_empty());
        assert!(users.find(8).is_none());
        assert_eq!(notices.last(), Some(Notice::Success("Usuario eliminado correctamente".into())));
    }

    #[test]
    fn test_failed_delete_keeps_rows() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let mut users: Catalog<'_, User> = Catalog::new(&ctx);
        users.fetch();
        api.fail_call("delete_user");

        assert!(!users.delete(7));
        assert_eq!(users.filtered().len(), 3);
        assert_eq!(notices.last(), Some(Notice::error("Error", "No se pudo eliminar el usuario")));
    }

    #[test]
    fn test_plaintext_and_export() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut users: Catalog<'_, User> = Catalog::new(&ctx);
        users.fetch();
        users.set_search("ana");

        let expected = "\
USUARIOS
========

Página 1 de 1 (1 usuarios)

#7 Ana Torres (TI / Soporte)
";
        assert_eq!(users.to_plaintext().unwrap(), expected);

        let mut out = vec![];
        assert_eq!(users.export(&mut out).unwrap(), 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Nombre completo,Área,Departamento\n7,Ana Torres,TI,Soporte\n"
        );
    }
}

const USERS_TEMPLATE: &str = "\
{{header title}}

Página {{page}} de {{page_count}} ({{total}} usuarios)
{{#each rows}}
#{{this.id}} {{this.name}} ({{this.area}} / {{this.department}})
{{/each}}\
";
