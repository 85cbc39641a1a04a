use crate::catalog::report;
use crate::ctx::Ctx;
use crate::messages::ComponentRegistration;
use crate::notify::Notice;

pub const MONITOR: &str = "Monitor";
pub const MOUSE: &str = "Mouse";
pub const KEYBOARD: &str = "Teclado";
pub const IP_PHONE: &str = "Teléfono IP";

pub const COMPONENT_KINDS: &[&str] = &[MONITOR, MOUSE, KEYBOARD, IP_PHONE];
pub const KEYBOARD_LANGUAGES: &[&str] = &["Español", "Inglés"];

#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum ComponentFormError {
    #[fail(display = "El tipo de componente es requerido")]
    MissingKind,
    #[fail(display = "Tipo de componente no válido: {}", _0)]
    UnknownKind(String),
    #[fail(display = "La marca del componente es requerida")]
    MissingBrand,
    #[fail(display = "El modelo del monitor es requerido")]
    MissingMonitorModel,
    #[fail(display = "El modelo del teléfono es requerido")]
    MissingPhoneModel,
    #[fail(display = "El idioma del teclado es requerido")]
    MissingKeyboardLanguage,
    #[fail(display = "Idioma de teclado no válido: {}", _0)]
    UnknownKeyboardLanguage(String),
}

/// The register component form. Which detail is required, and sent, depends on the kind:
/// monitors carry a model, IP phones a model, keyboards a language and mice nothing extra.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentForm {
    pub kind: String,
    pub brand: String,
    pub monitor_model: String,
    pub phone_model: String,
    pub keyboard_language: String,
}

fn only_for(kind: &str, wanted: &str, value: &str) -> Option<String> {
    if kind == wanted {
        Some(value.trim().to_string())
    } else {
        None
    }
}

impl ComponentForm {
    pub fn errors(&self) -> Vec<ComponentFormError> {
        let mut errors = vec![];
        let kind = self.kind.trim();
        if kind.is_empty() {
            errors.push(ComponentFormError::MissingKind);
        } else if !COMPONENT_KINDS.contains(&kind) {
            errors.push(ComponentFormError::UnknownKind(kind.to_string()));
        }
        if self.brand.trim().is_empty() {
            errors.push(ComponentFormError::MissingBrand);
        }
        match kind {
            MONITOR if self.monitor_model.trim().is_empty() => {
                errors.push(ComponentFormError::MissingMonitorModel)
            }
            IP_PHONE if self.phone_model.trim().is_empty() => {
                errors.push(ComponentFormError::MissingPhoneModel)
            }
            KEYBOARD => {
                let language = self.keyboard_language.trim();
                if language.is_empty() {
                    errors.push(ComponentFormError::MissingKeyboardLanguage);
                } else if !KEYBOARD_LANGUAGES.contains(&language) {
                    errors.push(ComponentFormError::UnknownKeyboardLanguage(language.to_string()));
                }
            }
            _ => {}
        }
        errors
    }

    pub fn payload(&self) -> Result<ComponentRegistration, Vec<ComponentFormError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        let kind = self.kind.trim();
        Ok(ComponentRegistration {
            kind: kind.to_string(),
            brand: self.brand.trim().to_string(),
            monitor_model: only_for(kind, MONITOR, &self.monitor_model),
            phone_model: only_for(kind, IP_PHONE, &self.phone_model),
            keyboard_language: only_for(kind, KEYBOARD, &self.keyboard_language),
        })
    }
}

/// Register a component. Returns whether it was saved.
pub fn register(ctx: &Ctx, form: &ComponentForm) -> bool {
    let payload = match form.payload() {
        Ok(payload) => payload,
        Err(errors) => {
            let text: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            info!("Component form rejected: {:?}", errors);
            ctx.notify(Notice::Validation(text.join(". ")));
            return false;
        }
    };
    report(
        ctx,
        ctx.api().create_component(&payload),
        "El componente ha sido registrado exitosamente en el sistema.",
        (
            "Error al registrar componente",
            "No se pudo registrar el componente. Inténtalo de nuevo.",
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{self, FakeApi};

    #[test]
    fn test_keyboard_sends_only_its_language() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let form = ComponentForm {
            kind: "Teclado".into(),
            brand: "Logitech".into(),
            monitor_model: "left over".into(),
            keyboard_language: "Español".into(),
            ..Default::default()
        };

        assert!(register(&ctx, &form));
        assert_eq!(
            api.written()[0],
            (
                "create_component",
                json!({
                    "tipoComponente": "Teclado",
                    "marcaComponente": "Logitech",
                    "modeloMonitor": null,
                    "modeloTelefono": null,
                    "idiomaTeclado": "Español"
                })
            )
        );
        assert_eq!(
            notices.last(),
            Some(Notice::Success("El componente ha sido registrado exitosamente en el sistema.".into()))
        );
    }

    #[test]
    fn test_kind_specific_requirements() {
        let monitor = ComponentForm {
            kind: "Monitor".into(),
            brand: "LG".into(),
            ..Default::default()
        };
        assert_eq!(monitor.errors(), vec![ComponentFormError::MissingMonitorModel]);

        let phone = ComponentForm {
            kind: "Teléfono IP".into(),
            ..Default::default()
        };
        assert_eq!(
            phone.errors(),
            vec![ComponentFormError::MissingBrand, ComponentFormError::MissingPhoneModel]
        );

        let keyboard = ComponentForm {
            kind: "Teclado".into(),
            brand: "HP".into(),
            keyboard_language: "Francés".into(),
            ..Default::default()
        };
        assert_eq!(
            keyboard.errors(),
            vec![ComponentFormError::UnknownKeyboardLanguage("Francés".into())]
        );

        let mouse = ComponentForm {
            kind: "Mouse".into(),
            brand: "HP".into(),
            ..Default::default()
        };
        assert!(mouse.errors().is_empty());
    }

    #[test]
    fn test_invalid_form_is_never_sent() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());

        assert!(!register(&ctx, &ComponentForm::default()));
        assert!(api.written().is_empty());
        assert_eq!(
            notices.last(),
            Some(Notice::Validation(
                "El tipo de componente es requerido. La marca del componente es requerida".into()
            ))
        );
    }

    #[test]
    fn test_failed_register_notifies() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        api.fail_call("create_component");
        let form = ComponentForm {
            kind: "Mouse".into(),
            brand: "HP".into(),
            ..Default::default()
        };

        assert!(!register(&ctx, &form));
        assert!(notices.last().unwrap().is_error());
    }
}
