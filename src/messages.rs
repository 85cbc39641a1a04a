//! Wire types shared with the inventory service. Field names on the wire are owned by the
//! backend and must not change; the rust side uses its own names and renames at the boundary.

use std::fmt;

use serde_json::Value;

#[derive(Serialize, RedactedDebug)]
pub struct LoginRequest {
    pub usuario: String,
    #[redacted]
    #[serde(rename = "contraseña")]
    pub password: String,
}

#[derive(Deserialize, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
    #[serde(rename = "expira", default)]
    pub expires: Option<Value>,
    #[serde(rename = "nombreAdmin", default)]
    pub display_name: Option<String>,
    #[serde(rename = "usuario", default)]
    pub username: Option<String>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires", &self.expires)
            .field("display_name", &self.display_name)
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: Option<i64>,
    #[serde(rename = "nombreUsuario")]
    pub name: Option<String>,
    pub area: Option<String>,
    #[serde(rename = "departamento")]
    pub department: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Equipment {
    #[serde(rename = "idEquipo")]
    pub id: Option<i64>,
    #[serde(rename = "tipoEquipo")]
    pub kind: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "modelo")]
    pub model: Option<String>,
    #[serde(rename = "tipoProcesador")]
    pub processor: Option<String>,
    #[serde(rename = "velocidadProcesador")]
    pub processor_speed: Option<Value>,
    #[serde(rename = "memoriaRam")]
    pub ram: Option<Value>,
    #[serde(rename = "tipoMemoriaRam")]
    pub ram_kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Component {
    #[serde(rename = "idComponente")]
    pub id: Option<i64>,
    #[serde(rename = "tipoComponente")]
    pub kind: Option<String>,
    #[serde(rename = "marcaComponente")]
    pub brand: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SecurityEquipment {
    #[serde(rename = "idEquipoSeguridad")]
    pub id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "modelo")]
    pub model: Option<String>,
}

/// An assignment as returned by the fetch-by-id endpoint. Everything is optional since the
/// backend is loose about nulls.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AssignmentRecord {
    #[serde(rename = "idAsignacion")]
    pub id: Option<i64>,
    #[serde(rename = "idUsuario")]
    pub user_id: Option<i64>,
    #[serde(rename = "idEquipo")]
    pub equipment_id: Option<i64>,
    #[serde(rename = "numSerieEquipo")]
    pub equipment_serial_number: Option<String>,
    #[serde(rename = "ipAddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "ipCpuRed")]
    pub network_cpu_ip: Option<String>,
    #[serde(rename = "fechaAsignacion")]
    pub assignment_date: Option<String>,
    #[serde(rename = "componentes")]
    pub components: Option<Vec<ComponentRecord>>,
    #[serde(rename = "dispositivosExt")]
    pub external_devices: Option<Vec<DeviceRecord>>,
    #[serde(rename = "idEquipoSeguridad")]
    pub security_equipment_id: Option<i64>,
    #[serde(rename = "numSerieEquipoSeg")]
    pub security_equipment_serial_number: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ComponentRecord {
    #[serde(rename = "idComponente")]
    pub component_id: Option<i64>,
    #[serde(rename = "numSerieComponente")]
    pub serial_number: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DeviceRecord {
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "numSerieDispExt")]
    pub serial_number: Option<String>,
}

/// The body of both the create and the update calls. `id` is only present on update.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssignmentPayload {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "idEquipo")]
    pub equipment_id: Option<i64>,
    #[serde(rename = "numSerieEquipo")]
    pub equipment_serial_number: String,
    #[serde(rename = "fechaAsignacion")]
    pub assignment_date: String,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(rename = "ipCpuRed")]
    pub network_cpu_ip: String,
    #[serde(rename = "componentes")]
    pub components: Vec<ComponentPayload>,
    #[serde(rename = "dispositivosExt")]
    pub external_devices: Vec<DevicePayload>,
    #[serde(rename = "idEquipoSeguridad")]
    pub security_equipment_id: Option<i64>,
    #[serde(rename = "numSerieEquipoSeg")]
    pub security_equipment_serial_number: String,
    #[serde(rename = "idAsignacion", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComponentPayload {
    #[serde(rename = "idComponente")]
    pub component_id: Option<i64>,
    #[serde(rename = "numSerieComponente")]
    pub serial_number: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DevicePayload {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "numSerieDispExt")]
    pub serial_number: String,
}

/// The body of the user create and update calls. This endpoint wants its field names
/// capitalised, unlike the rest of the service.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserPayload {
    #[serde(rename = "idUsuario", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "NombreUsuario")]
    pub name: String,
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Departamento")]
    pub department: String,
}

/// The body of the equipment create and update calls. Partitions are whole gigabytes, anything
/// unparseable is sent as 0.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EquipmentPayload {
    #[serde(rename = "idEquipo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "tipoEquipo")]
    pub kind: String,
    #[serde(rename = "velocidadProcesador")]
    pub processor_speed: String,
    #[serde(rename = "tipoProcesador")]
    pub processor: String,
    #[serde(rename = "memoriaRam")]
    pub ram: String,
    #[serde(rename = "tipoMemoriaRam")]
    pub ram_kind: String,
    #[serde(rename = "marcaDisco")]
    pub disk_brand: String,
    #[serde(rename = "modeloDisco")]
    pub disk_model: String,
    pub c: i64,
    pub d: i64,
    pub e: i64,
}

/// Registers a component. Only the detail matching `kind` is sent, the others are null.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComponentRegistration {
    #[serde(rename = "tipoComponente")]
    pub kind: String,
    #[serde(rename = "marcaComponente")]
    pub brand: String,
    #[serde(rename = "modeloMonitor")]
    pub monitor_model: Option<String>,
    #[serde(rename = "modeloTelefono")]
    pub phone_model: Option<String>,
    #[serde(rename = "idiomaTeclado")]
    pub keyboard_language: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SecurityEquipmentPayload {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "capacidad")]
    pub capacity: String,
    #[serde(rename = "tipo")]
    pub kind: String,
}

#[derive(Serialize, RedactedDebug)]
pub struct AdminRegistration {
    #[serde(rename = "nombreAdmin")]
    pub name: String,
    pub usuario: String,
    #[redacted]
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// The filtered assignment views, selected with the `tipo` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Equipment,
    Keyboards,
    Mice,
}

impl AssignmentKind {
    pub fn as_param(self) -> &'static str {
        match self {
            AssignmentKind::Equipment => "equipos",
            AssignmentKind::Keyboards => "teclados",
            AssignmentKind::Mice => "mouse",
        }
    }

    /// Whether rows of this view are about a component rather than a piece of equipment.
    pub fn is_component(self) -> bool {
        match self {
            AssignmentKind::Equipment => false,
            AssignmentKind::Keyboards | AssignmentKind::Mice => true,
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = failure::Error;

    fn from_str(s: &str) -> Result<AssignmentKind, failure::Error> {
        match s {
            "equipos" => Ok(AssignmentKind::Equipment),
            "teclados" => Ok(AssignmentKind::Keyboards),
            "mouse" => Ok(AssignmentKind::Mice),
            other => Err(format_err!("Unknown assignment view: {}", other)),
        }
    }
}

/// One row of the "complete assignments" listing.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AssignmentSummary {
    #[serde(rename = "idAsignacion")]
    pub id: i64,
    #[serde(rename = "fechaAsignacion")]
    pub assignment_date: Option<String>,
    #[serde(rename = "usuario")]
    pub user: Option<User>,
    #[serde(rename = "detalleAsignaciones")]
    pub details: Option<Vec<AssignmentDetail>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AssignmentDetail {
    #[serde(rename = "equipo")]
    pub equipment: Option<EquipmentDetail>,
    #[serde(rename = "componente")]
    pub component: Option<ComponentDetail>,
    #[serde(rename = "numSerieComponente")]
    pub component_serial_number: Option<String>,
    #[serde(rename = "numSerieEquipo")]
    pub equipment_serial_number: Option<String>,
    #[serde(rename = "ipAddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "ipCpuRed")]
    pub network_cpu_ip: Option<String>,
    #[serde(rename = "equipoSeguridad")]
    pub security_equipment: Option<SecurityEquipmentDetail>,
    #[serde(rename = "numSerieEquipoSeg")]
    pub security_equipment_serial_number: Option<String>,
}

// The backend sends some of these as numbers and some as strings depending on the record, so
// they're kept as raw json values and formatted on display.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EquipmentDetail {
    #[serde(rename = "tipoEquipo")]
    pub kind: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "modelo")]
    pub model: Option<String>,
    #[serde(rename = "tipoProcesador")]
    pub processor: Option<String>,
    #[serde(rename = "velocidadProcesador")]
    pub processor_speed: Option<Value>,
    #[serde(rename = "memoriaRam")]
    pub ram: Option<Value>,
    #[serde(rename = "tipoMemoriaRam")]
    pub ram_kind: Option<String>,
    #[serde(rename = "discoDuro")]
    pub disk: Option<DiskDetail>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DiskDetail {
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "modelo")]
    pub model: Option<String>,
    #[serde(rename = "capacidad")]
    pub capacity: Option<Value>,
    pub c: Option<Value>,
    pub d: Option<Value>,
    pub e: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ComponentDetail {
    #[serde(rename = "tipoComponente")]
    pub kind: Option<String>,
    #[serde(rename = "marcaComponente")]
    pub brand: Option<String>,
    #[serde(rename = "idiomaTeclado")]
    pub keyboard_language: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SecurityEquipmentDetail {
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "modelo")]
    pub model: Option<String>,
    #[serde(rename = "capacidad")]
    pub capacity: Option<Value>,
}
