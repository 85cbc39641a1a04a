use chrono::NaiveDate;

use crate::form::{AssignmentForm, DATE_INPUT_FORMAT};
use crate::messages::{AssignmentPayload, ComponentPayload, DevicePayload};

#[derive(Fail, Debug, PartialEq)]
pub enum SubmitError {
    #[fail(display = "Debe seleccionar un usuario")]
    MissingUser,
    #[fail(display = "Fecha de asignación no válida: {:?}", _0)]
    InvalidDate(String),
    #[fail(display = "Valor no válido para {}: {:?}", _0, _1)]
    InvalidId(&'static str, String),
}

/// Which call a payload is destined for. Only an update carries the assignment id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update(i64),
}

impl Mode {
    pub fn of(form: &AssignmentForm) -> Mode {
        match form.assignment_id {
            Some(id) => Mode::Update(id),
            None => Mode::Create,
        }
    }
}

fn parse_id(what: &'static str, raw: &str) -> Result<i64, SubmitError> {
    raw.trim()
        .parse()
        .map_err(|_| SubmitError::InvalidId(what, raw.to_string()))
}

fn optional_id(what: &'static str, raw: &str) -> Result<Option<i64>, SubmitError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_id(what, raw).map(Some)
    }
}

/// The date input holds a calendar date; the backend wants it as a UTC midnight timestamp.
pub fn wire_date(raw: &str) -> Result<String, SubmitError> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| SubmitError::InvalidDate(raw.to_string()))?;
    Ok(date.format("%Y-%m-%dT00:00:00.000Z").to_string())
}

/// Build the wire payload out of the current form state. Incomplete rows are dropped, not
/// rejected. The form itself is never touched.
pub fn build_payload(form: &AssignmentForm) -> Result<AssignmentPayload, SubmitError> {
    let user_id = form.user_id.ok_or(SubmitError::MissingUser)?;

    let components = form
        .components()
        .iter()
        .filter(|line| line.is_complete())
        .map(|line| {
            Ok(ComponentPayload {
                component_id: Some(parse_id("idComponente", &line.component_id)?),
                serial_number: line.serial_number.clone(),
            })
        })
        .collect::<Result<Vec<_>, SubmitError>>()?;

    let external_devices = form
        .external_devices()
        .iter()
        .filter(|line| line.is_complete())
        .map(|line| DevicePayload {
            brand: line.brand.clone(),
            description: line.description.clone(),
            serial_number: line.serial_number.clone(),
        })
        .collect();

    Ok(AssignmentPayload {
        user_id,
        equipment_id: form.equipment_id,
        equipment_serial_number: form.equipment_serial_number.clone(),
        assignment_date: wire_date(&form.assignment_date)?,
        ip_address: form.ip_address.clone(),
        network_cpu_ip: form.network_cpu_ip.clone(),
        components,
        external_devices,
        security_equipment_id: optional_id("idEquipoSeguridad", &form.security_equipment_id)?,
        security_equipment_serial_number: form.security_equipment_serial_number.clone(),
        id: match Mode::of(form) {
            Mode::Update(id) => Some(id),
            Mode::Create => None,
        },
    })
}
