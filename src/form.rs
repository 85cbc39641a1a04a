use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::prelude::*;

use crate::reference::SelectOption;

/// The format of the date input. Calendar date only, no time component.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

static NEXT_ROW: AtomicU64 = AtomicU64::new(0);

/// Client side identity of a component or device row. Only ever used to address a row for
/// editing or removal; it is never sent to the server, and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    millis: i64,
    seq: u64,
    salt: u32,
}

impl RowId {
    pub fn generate() -> RowId {
        RowId {
            millis: Utc::now().timestamp_millis(),
            seq: NEXT_ROW.fetch_add(1, Ordering::SeqCst),
            salt: rand::random(),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}-{:08x}", self.millis, self.seq, self.salt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Components,
    ExternalDevices,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Components => f.write_str("component"),
            ListKind::ExternalDevices => f.write_str("external device"),
        }
    }
}

#[derive(Fail, Debug, PartialEq)]
pub enum FormError {
    #[fail(display = "Unknown field: {}", _0)]
    UnknownField(String),
    #[fail(display = "There is no {} row at position {}", _0, _1)]
    NoSuchRow(ListKind, usize),
    #[fail(display = "There is no {} row {}", _0, _1)]
    UnknownRow(ListKind, RowId),
    #[fail(display = "At least one {} row must remain", _0)]
    LastRow(ListKind),
}

/// The top level free text fields, addressable by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    EquipmentSerialNumber,
    IpAddress,
    NetworkCpuIp,
    AssignmentDate,
    SecurityEquipmentId,
    SecurityEquipmentSerialNumber,
}

impl FromStr for ScalarField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "numSerieEquipo" => Ok(ScalarField::EquipmentSerialNumber),
            "ipAddress" => Ok(ScalarField::IpAddress),
            "ipCpuRed" => Ok(ScalarField::NetworkCpuIp),
            "fechaAsignacion" => Ok(ScalarField::AssignmentDate),
            "idEquipoSeguridad" => Ok(ScalarField::SecurityEquipmentId),
            "numSerieEquipoSeg" => Ok(ScalarField::SecurityEquipmentSerialNumber),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentField {
    ComponentId,
    SerialNumber,
}

impl FromStr for ComponentField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "idComponente" => Ok(ComponentField::ComponentId),
            "numSerieComponente" => Ok(ComponentField::SerialNumber),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceField {
    Brand,
    Description,
    SerialNumber,
}

impl FromStr for DeviceField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "marca" => Ok(DeviceField::Brand),
            "descripcion" => Ok(DeviceField::Description),
            "numSerieDispExt" => Ok(DeviceField::SerialNumber),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLine {
    pub row_id: RowId,
    /// The selected component id, as the selection control holds it. Empty when nothing is picked.
    pub component_id: String,
    pub serial_number: String,
}

impl ComponentLine {
    pub fn empty() -> ComponentLine {
        ComponentLine {
            row_id: RowId::generate(),
            component_id: String::new(),
            serial_number: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.component_id.trim().is_empty() && !self.serial_number.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLine {
    pub row_id: RowId,
    pub brand: String,
    pub description: String,
    pub serial_number: String,
}

impl DeviceLine {
    pub fn empty() -> DeviceLine {
        DeviceLine {
            row_id: RowId::generate(),
            brand: String::new(),
            description: String::new(),
            serial_number: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.brand.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.serial_number.trim().is_empty()
    }
}

/// The assignment being edited. Nothing is validated on the way in; that happens once, at
/// submission.
///
/// Both row lists always hold at least one row. Removal of the last row is refused rather than
/// a replacement row being appended.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentForm {
    pub assignment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub equipment_serial_number: String,
    pub ip_address: String,
    pub network_cpu_ip: String,
    /// As typed into the date input, `YYYY-MM-DD`.
    pub assignment_date: String,
    components: Vec<ComponentLine>,
    external_devices: Vec<DeviceLine>,
    /// As held by the selection control. Empty when nothing is picked.
    pub security_equipment_id: String,
    pub security_equipment_serial_number: String,
}

impl Default for AssignmentForm {
    fn default() -> Self {
        AssignmentForm::new()
    }
}

impl AssignmentForm {
    /// An empty form dated today.
    pub fn new() -> AssignmentForm {
        AssignmentForm::dated(Utc::now().date_naive())
    }

    pub fn dated(date: NaiveDate) -> AssignmentForm {
        AssignmentForm {
            assignment_id: None,
            user_id: None,
            equipment_id: None,
            equipment_serial_number: String::new(),
            ip_address: String::new(),
            network_cpu_ip: String::new(),
            assignment_date: date.format(DATE_INPUT_FORMAT).to_string(),
            components: vec![ComponentLine::empty()],
            external_devices: vec![DeviceLine::empty()],
            security_equipment_id: String::new(),
            security_equipment_serial_number: String::new(),
        }
    }

    /// Replace both row lists, substituting a single empty row for an empty list.
    pub(crate) fn set_lines(&mut self, components: Vec<ComponentLine>, external_devices: Vec<DeviceLine>) {
        self.components = if components.is_empty() {
            vec![ComponentLine::empty()]
        } else {
            components
        };
        self.external_devices = if external_devices.is_empty() {
            vec![DeviceLine::empty()]
        } else {
            external_devices
        };
    }

    pub fn components(&self) -> &[ComponentLine] {
        &self.components
    }

    pub fn external_devices(&self) -> &[DeviceLine] {
        &self.external_devices
    }

    pub fn set(&mut self, field: ScalarField, value: &str) {
        let target = match field {
            ScalarField::EquipmentSerialNumber => &mut self.equipment_serial_number,
            ScalarField::IpAddress => &mut self.ip_address,
            ScalarField::NetworkCpuIp => &mut self.network_cpu_ip,
            ScalarField::AssignmentDate => &mut self.assignment_date,
            ScalarField::SecurityEquipmentId => &mut self.security_equipment_id,
            ScalarField::SecurityEquipmentSerialNumber => &mut self.security_equipment_serial_number,
        };
        *target = value.to_string();
    }

    /// Set a scalar field by its wire name.
    pub fn set_scalar_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = name.parse()?;
        self.set(field, value);
        Ok(())
    }

    pub fn set_user_selection(&mut self, selected: Option<&SelectOption>) {
        self.user_id = selected.map(|o| o.value);
    }

    pub fn set_equipment_selection(&mut self, selected: Option<&SelectOption>) {
        self.equipment_id = selected.map(|o| o.value);
    }

    pub fn set_component_line_field(&mut self, index: usize, field: ComponentField, value: &str) -> Result<(), FormError> {
        let line = self
            .components
            .get_mut(index)
            .ok_or(FormError::NoSuchRow(ListKind::Components, index))?;
        match field {
            ComponentField::ComponentId => line.component_id = value.to_string(),
            ComponentField::SerialNumber => line.serial_number = value.to_string(),
        }
        Ok(())
    }

    pub fn set_device_line_field(&mut self, index: usize, field: DeviceField, value: &str) -> Result<(), FormError> {
        let line = self
            .external_devices
            .get_mut(index)
            .ok_or(FormError::NoSuchRow(ListKind::ExternalDevices, index))?;
        match field {
            DeviceField::Brand => line.brand = value.to_string(),
            DeviceField::Description => line.description = value.to_string(),
            DeviceField::SerialNumber => line.serial_number = value.to_string(),
        }
        Ok(())
    }

    pub fn add_component_line(&mut self) -> RowId {
        let line = ComponentLine::empty();
        let row_id = line.row_id;
        self.components.push(line);
        row_id
    }

    pub fn add_device_line(&mut self) -> RowId {
        let line = DeviceLine::empty();
        let row_id = line.row_id;
        self.external_devices.push(line);
        row_id
    }

    pub fn remove_component_line(&mut self, row_id: RowId) -> Result<(), FormError> {
        let index = self
            .components
            .iter()
            .position(|line| line.row_id == row_id)
            .ok_or(FormError::UnknownRow(ListKind::Components, row_id))?;
        if self.components.len() == 1 {
            return Err(FormError::LastRow(ListKind::Components));
        }
        self.components.remove(index);
        Ok(())
    }

    pub fn remove_device_line(&mut self, row_id: RowId) -> Result<(), FormError> {
        let index = self
            .external_devices
            .iter()
            .position(|line| line.row_id == row_id)
            .ok_or(FormError::UnknownRow(ListKind::ExternalDevices, row_id))?;
        if self.external_devices.len() == 1 {
            return Err(FormError::LastRow(ListKind::ExternalDevices));
        }
        self.external_devices.remove(index);
        Ok(())
    }
}
