use crate::messages::AdminRegistration;

#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminFormError {
    #[fail(display = "El nombre del administrador es requerido")]
    MissingName,
    #[fail(display = "El usuario es requerido")]
    MissingUsername,
    #[fail(display = "La contraseña es requerida")]
    MissingPassword,
    #[fail(display = "Contraseñas no coinciden")]
    PasswordMismatch,
}

/// Signing up a new administrator. The password has to be typed twice.
#[derive(RedactedDebug, Clone, Default)]
pub struct AdminForm {
    pub name: String,
    pub username: String,
    #[redacted]
    pub password: String,
    #[redacted]
    pub confirmation: String,
}

impl AdminForm {
    pub fn registration(&self) -> Result<AdminRegistration, AdminFormError> {
        if self.name.trim().is_empty() {
            return Err(AdminFormError::MissingName);
        }
        if self.username.trim().is_empty() {
            return Err(AdminFormError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(AdminFormError::MissingPassword);
        }
        if self.password != self.confirmation {
            return Err(AdminFormError::PasswordMismatch);
        }
        Ok(AdminRegistration {
            name: self.name.trim().to_string(),
            usuario: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
