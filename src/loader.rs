use chrono::prelude::*;
use failure::Error;

use crate::client::InventoryApi;
use crate::form::{AssignmentForm, ComponentLine, DeviceLine, RowId, DATE_INPUT_FORMAT};
use crate::messages::AssignmentRecord;

/// Reduce whatever the backend sends as a date to the calendar date shown in the date input.
/// Timestamps carrying an offset are converted to UTC first.
pub fn record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).ok()
}

/// Convert a fetched record into form state for the assignment `id`.
///
/// Every row gets a freshly generated `RowId` since the server has no notion of one, and an
/// empty list becomes a single empty row.
pub fn hydrate(id: i64, record: AssignmentRecord, today: NaiveDate) -> AssignmentForm {
    let date = match record.assignment_date.as_ref() {
        Some(raw) => record_date(raw).unwrap_or_else(|| {
            warn!("Couldn't parse assignment date {:?}, using today", raw);
            today
        }),
        None => today,
    };

    let mut form = AssignmentForm::dated(date);
    form.assignment_id = Some(id);
    form.user_id = record.user_id;
    form.equipment_id = record.equipment_id;
    form.equipment_serial_number = record.equipment_serial_number.unwrap_or_default();
    form.ip_address = record.ip_address.unwrap_or_default();
    form.network_cpu_ip = record.network_cpu_ip.unwrap_or_default();
    form.security_equipment_id = record
        .security_equipment_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    form.security_equipment_serial_number = record.security_equipment_serial_number.unwrap_or_default();

    let components = record
        .components
        .unwrap_or_default()
        .into_iter()
        .map(|c| ComponentLine {
            row_id: RowId::generate(),
            component_id: c.component_id.map(|id| id.to_string()).unwrap_or_default(),
            serial_number: c.serial_number.unwrap_or_default(),
        })
        .collect();
    let devices = record
        .external_devices
        .unwrap_or_default()
        .into_iter()
        .map(|d| DeviceLine {
            row_id: RowId::generate(),
            brand: d.brand.unwrap_or_default(),
            description: d.description.unwrap_or_default(),
            serial_number: d.serial_number.unwrap_or_default(),
        })
        .collect();
    form.set_lines(components, devices);

    form
}

/// Fetch assignment `id` and convert it into form state.
pub fn load_record(api: &dyn InventoryApi, id: i64) -> Result<AssignmentForm, Error> {
    info!("Loading assignment {}", id);
    let record = api.assignment(id)?;
    Ok(hydrate(id, record, Utc::now().date_naive()))
}
