use failure::Error;

use crate::catalog::{any_contains, report, Entry, Texts};
use crate::client::InventoryApi;
use crate::ctx::Ctx;
use crate::formatting::{or_missing, value_text, with_qualifier, MISSING};
use crate::messages::{Equipment, EquipmentPayload, SecurityEquipmentPayload};
use crate::notify::Notice;

/// The kinds of equipment the service knows about.
pub const EQUIPMENT_KINDS: &[&str] = &["Escritorio", "Laptop"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentRow {
    pub id: String,
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub processor: String,
    pub ram: String,
}

#[derive(Debug, Serialize)]
pub struct EquipmentExport {
    #[serde(rename = "ID")]
    id: Option<i64>,
    #[serde(rename = "Tipo de Equipo")]
    kind: String,
    #[serde(rename = "Marca")]
    brand: String,
    #[serde(rename = "Modelo")]
    model: String,
    #[serde(rename = "CPU")]
    processor: String,
    #[serde(rename = "RAM")]
    ram: String,
}

fn processor(equipment: &Equipment) -> String {
    let name = equipment.processor.clone().filter(|p| !p.trim().is_empty());
    match (name, equipment.processor_speed.as_ref().and_then(value_text)) {
        (Some(name), Some(speed)) => format!("{} ({})", name, speed),
        (Some(name), None) => name,
        (None, _) => MISSING.to_string(),
    }
}

fn ram(equipment: &Equipment) -> String {
    with_qualifier(
        equipment.ram.as_ref().and_then(value_text),
        equipment.ram_kind.clone().filter(|k| !k.trim().is_empty()),
        false,
    )
}

impl Entry for Equipment {
    type Row = EquipmentRow;
    type Export = EquipmentExport;

    const TEXTS: Texts = Texts {
        title: "EQUIPOS",
        load_failed: "No se pudieron cargar los equipos. Intente nuevamente.",
        deleted: "Equipo eliminado correctamente",
        delete_failed: "No se pudo eliminar el equipo",
    };
    const TEMPLATE: &'static str = EQUIPMENT_TEMPLATE;

    fn fetch(api: &dyn InventoryApi) -> Result<Vec<Equipment>, Error> {
        api.equipment()
    }

    fn delete(api: &dyn InventoryApi, id: i64) -> Result<(), Error> {
        api.delete_equipment(id)
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        any_contains(
            &[
                self.kind.as_deref(),
                self.brand.as_deref(),
                self.model.as_deref(),
                self.processor.as_deref(),
            ],
            needle,
        )
    }

    fn row(&self) -> EquipmentRow {
        EquipmentRow {
            id: self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            kind: or_missing(self.kind.as_deref()),
            brand: or_missing(self.brand.as_deref()),
            model: or_missing(self.model.as_deref()),
            processor: processor(self),
            ram: ram(self),
        }
    }

    fn export_row(&self) -> EquipmentExport {
        EquipmentExport {
            id: self.id,
            kind: or_missing(self.kind.as_deref()),
            brand: or_missing(self.brand.as_deref()),
            model: or_missing(self.model.as_deref()),
            processor: processor(self),
            ram: ram(self),
        }
    }
}

#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum EquipmentFormError {
    #[fail(display = "El tipo de equipo es requerido")]
    MissingKind,
    #[fail(display = "Tipo de equipo no válido: {}", _0)]
    UnknownKind(String),
    #[fail(display = "La marca es requerida")]
    MissingBrand,
    #[fail(display = "El modelo es requerido")]
    MissingModel,
}

/// A partition size in whole gigabytes. Leading digits count, eg "250 GB" is 250; anything else
/// is 0.
/// ```rust
/// # use inventario::equipment::partition_size;
/// assert_eq!(partition_size("250 GB"), 250);
/// assert_eq!(partition_size(" -5"), -5);
/// assert_eq!(partition_size("GB"), 0);
/// ```
pub fn partition_size(raw: &str) -> i64 {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// The register/update equipment form. Kind, brand and model are required; everything else is
/// sent as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentForm {
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub processor: String,
    pub processor_speed: String,
    pub ram: String,
    pub ram_kind: String,
    pub disk_brand: String,
    pub disk_model: String,
    pub c: String,
    pub d: String,
    pub e: String,
}

impl EquipmentForm {
    /// Only what the equipment listing carries; disk details start blank.
    pub fn from_equipment(equipment: &Equipment) -> EquipmentForm {
        EquipmentForm {
            kind: equipment.kind.clone().unwrap_or_default(),
            brand: equipment.brand.clone().unwrap_or_default(),
            model: equipment.model.clone().unwrap_or_default(),
            processor: equipment.processor.clone().unwrap_or_default(),
            processor_speed: equipment
                .processor_speed
                .as_ref()
                .and_then(value_text)
                .unwrap_or_default(),
            ram: equipment.ram.as_ref().and_then(value_text).unwrap_or_default(),
            ram_kind: equipment.ram_kind.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn errors(&self) -> Vec<EquipmentFormError> {
        let mut errors = vec![];
        let kind = self.kind.trim();
        if kind.is_empty() {
            errors.push(EquipmentFormError::MissingKind);
        } else if !EQUIPMENT_KINDS.contains(&kind) {
            errors.push(EquipmentFormError::UnknownKind(kind.to_string()));
        }
        if self.brand.trim().is_empty() {
            errors.push(EquipmentFormError::MissingBrand);
        }
        if self.model.trim().is_empty() {
            errors.push(EquipmentFormError::MissingModel);
        }
        errors
    }

    pub fn payload(&self, id: Option<i64>) -> Result<EquipmentPayload, Vec<EquipmentFormError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EquipmentPayload {
            id,
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            kind: self.kind.trim().to_string(),
            processor_speed: self.processor_speed.trim().to_string(),
            processor: self.processor.trim().to_string(),
            ram: self.ram.trim().to_string(),
            ram_kind: self.ram_kind.trim().to_string(),
            disk_brand: self.disk_brand.trim().to_string(),
            disk_model: self.disk_model.trim().to_string(),
            c: partition_size(&self.c),
            d: partition_size(&self.d),
            e: partition_size(&self.e),
        })
    }
}

fn validated(ctx: &Ctx, form: &EquipmentForm, id: Option<i64>) -> Option<EquipmentPayload> {
    match form.payload(id) {
        Ok(payload) => Some(payload),
        Err(errors) => {
            let text: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            info!("Equipment form rejected: {:?}", errors);
            ctx.notify(Notice::Validation(text.join(". ")));
            None
        }
    }
}

pub fn register(ctx: &Ctx, form: &EquipmentForm) -> bool {
    let payload = match validated(ctx, form, None) {
        Some(payload) => payload,
        None => return false,
    };
    report(
        ctx,
        ctx.api().create_equipment(&payload),
        "Equipo registrado exitosamente.",
        ("Error", "No se pudo registrar el equipo. Por favor, intenta de nuevo."),
    )
}

pub fn update(ctx: &Ctx, id: i64, form: &EquipmentForm) -> bool {
    let payload = match validated(ctx, form, Some(id)) {
        Some(payload) => payload,
        None => return false,
    };
    report(
        ctx,
        ctx.api().update_equipment(&payload),
        "Equipo actualizado exitosamente.",
        ("Error", "No se pudo actualizar el equipo. Por favor, intenta de nuevo."),
    )
}

/// The register security equipment form, eg a UPS or a voltage regulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityEquipmentForm {
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub capacity: String,
}

#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEquipmentFormError {
    #[fail(display = "El tipo de equipo de seguridad es requerido")]
    MissingKind,
    #[fail(display = "La marca es requerida")]
    MissingBrand,
}

impl SecurityEquipmentForm {
    pub fn payload(&self) -> Result<SecurityEquipmentPayload, SecurityEquipmentFormError> {
        if self.kind.trim().is_empty() {
            return Err(SecurityEquipmentFormError::MissingKind);
        }
        if self.brand.trim().is_empty() {
            return Err(SecurityEquipmentFormError::MissingBrand);
        }
        Ok(SecurityEquipmentPayload {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            capacity: self.capacity.trim().to_string(),
            kind: self.kind.trim().to_string(),
        })
    }
}

pub fn register_security_equipment(ctx: &Ctx, form: &SecurityEquipmentForm) -> bool {
    let payload = match form.payload() {
        Ok(payload) => payload,
        Err(e) => {
            ctx.notify(Notice::Validation(e.to_string()));
            return false;
        }
    };
    report(
        ctx,
        ctx.api().create_security_equipment(&payload),
        "Equipo de Seguridad registrado exitosamente.",
        (
            "Error",
            "No se pudo registrar el equipo de seguridad. Por favor intenta de nuevo.",
        ),
    )
}


const EQUIPMENT_TEMPLATE: &str = "\
{{header title}}

Página {{page}} de {{page_count}} ({{total}} equipos)
{{#each rows}}
#{{this.id}} {{this.kind}} {{this.brand}} {{this.model}}
    CPU: {{this.processor}}, RAM: {{this.ram}}
{{/each}}\
";
