use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use failure::Error;
use tempfile;

use crate::client::InventoryApi;
use crate::ctx::{Ctx, Lifetime};
use crate::messages::*;
use crate::notify::RecordingNotifier;

pub(crate) fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

pub(crate) fn users() -> Vec<User> {
    vec![
        User {
            id: Some(7),
            name: Some("Ana Torres".into()),
            area: Some("TI".into()),
            department: Some("Soporte".into()),
        },
        User {
            id: Some(8),
            name: Some("Luis Mora".into()),
            area: Some("Finanzas".into()),
            department: None,
        },
        User {
            id: None,
            name: Some("Sin id".into()),
            ..Default::default()
        },
    ]
}

pub(crate) fn equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: Some(3),
            kind: Some("Laptop".into()),
            brand: Some("Dell".into()),
            model: Some("Latitude".into()),
            processor: Some("i5".into()),
            ram: Some(json!(16)),
            ram_kind: Some("DDR4".into()),
            ..Default::default()
        },
        Equipment {
            id: None,
            kind: Some("Desktop".into()),
            ..Default::default()
        },
    ]
}

pub(crate) fn components() -> Vec<Component> {
    vec![
        Component {
            id: Some(5),
            kind: Some("Monitor".into()),
            brand: Some("LG".into()),
        },
        Component {
            id: Some(6),
            kind: Some("Teclado".into()),
            brand: Some("Logitech".into()),
        },
    ]
}

pub(crate) fn security_equipment() -> Vec<SecurityEquipment> {
    vec![SecurityEquipment {
        id: Some(4),
        kind: Some("UPS".into()),
        brand: Some("APC".into()),
        model: None,
    }]
}

pub(crate) fn record_42() -> AssignmentRecord {
    AssignmentRecord {
        id: Some(42),
        user_id: Some(7),
        equipment_id: Some(3),
        equipment_serial_number: Some("EQ-42".into()),
        ip_address: Some("10.0.0.42".into()),
        network_cpu_ip: None,
        assignment_date: Some("2024-03-05T00:00:00".into()),
        components: Some(vec![
            ComponentRecord {
                component_id: Some(5),
                serial_number: Some("MON-1".into()),
            },
            ComponentRecord {
                component_id: Some(6),
                serial_number: Some("KB-1".into()),
            },
        ]),
        external_devices: Some(vec![DeviceRecord {
            brand: Some("Logitech".into()),
            description: Some("Mouse".into()),
            serial_number: Some("M-1".into()),
        }]),
        security_equipment_id: None,
        security_equipment_serial_number: None,
    }
}

lazy_static! {
    static ref SUMMARIES: serde_json::Value = json!([
        {
            "idAsignacion": 1,
            "fechaAsignacion": "2024-03-05T00:00:00",
            "usuario": {"idUsuario": 7, "nombreUsuario": "Ana Torres", "area": "TI", "departamento": "Soporte"},
            "detalleAsignaciones": [{
                "equipo": {
                    "tipoEquipo": "Laptop",
                    "marca": "Dell",
                    "modelo": "Latitude",
                    "tipoProcesador": "i5",
                    "velocidadProcesador": "2.4 GHz",
                    "memoriaRam": 16,
                    "tipoMemoriaRam": "DDR4",
                    "discoDuro": {"marca": "Samsung", "modelo": "EVO", "capacidad": 512, "c": 200, "d": 312}
                },
                "numSerieEquipo": "EQ-1",
                "ipAddress": "10.0.0.1"
            }]
        },
        {
            "idAsignacion": 12,
            "fechaAsignacion": "2024-04-01T00:00:00",
            "usuario": {"idUsuario": 8, "nombreUsuario": "Luis Mora", "area": "Finanzas"},
            "detalleAsignaciones": []
        }
    ]);
}

pub(crate) fn summaries() -> Vec<AssignmentSummary> {
    serde_json::from_value(SUMMARIES.clone()).unwrap()
}

pub(crate) fn keyboard_summaries() -> Vec<AssignmentSummary> {
    serde_json::from_value(json!([{
        "idAsignacion": 30,
        "fechaAsignacion": "2024-05-10T00:00:00",
        "usuario": {"idUsuario": 7, "nombreUsuario": "Ana Torres", "area": "TI", "departamento": "Soporte"},
        "detalleAsignaciones": [{
            "componente": {"tipoComponente": "Teclado", "marcaComponente": "Logitech", "idiomaTeclado": "Español"},
            "numSerieComponente": "KB-9"
        }]
    }])).unwrap()
}

/// An in-memory stand in for the inventory service. Every call is counted, and any group of
/// calls can be made to fail.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<Vec<&'static str>>,
    submitted: Mutex<Vec<(&'static str, AssignmentPayload)>>,
    written: Mutex<Vec<(&'static str, serde_json::Value)>>,
    summaries: Mutex<Vec<AssignmentSummary>>,
    users: Mutex<Vec<User>>,
    equipment: Mutex<Vec<Equipment>>,
    on_fetch: Option<Lifetime>,
}

impl FakeApi {
    pub(crate) fn new() -> FakeApi {
        let api = FakeApi::default();
        *api.summaries.lock().unwrap() = summaries();
        *api.users.lock().unwrap() = users();
        *api.equipment.lock().unwrap() = equipment();
        api
    }

    /// End `lifetime` as soon as any fetch is made, as if the form closed while it was in flight.
    pub(crate) fn end_lifetime_on_fetch(mut self, lifetime: Lifetime) -> FakeApi {
        self.on_fetch = Some(lifetime);
        self
    }

    fn fail(&self, what: &'static str) {
        self.failing.lock().unwrap().push(what);
    }

    pub(crate) fn fail_components(&self) {
        self.fail("components");
    }

    pub(crate) fn fail_record(&self) {
        self.fail("assignment");
    }

    pub(crate) fn fail_submit(&self) {
        self.fail("create");
        self.fail("update");
    }

    pub(crate) fn fail_listing(&self) {
        self.fail("assignments");
    }

    pub(crate) fn fail_delete(&self) {
        self.fail("delete");
    }

    pub(crate) fn fail_call(&self, what: &'static str) {
        self.fail(what);
    }

    pub(crate) fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub(crate) fn calls(&self, what: &str) -> usize {
        self.calls.lock().unwrap().get(what).cloned().unwrap_or(0)
    }

    pub(crate) fn submitted(&self) -> Vec<(&'static str, AssignmentPayload)> {
        self.submitted.lock().unwrap().clone()
    }

    /// Every non-assignment payload sent, as the json that would have gone over the wire.
    pub(crate) fn written(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.written.lock().unwrap().clone()
    }

    fn write<P: serde::Serialize>(&self, what: &'static str, payload: &P) -> Result<(), Error> {
        self.written.lock().unwrap().push((what, serde_json::to_value(payload)?));
        self.call(what)
    }

    fn call(&self, what: &'static str) -> Result<(), Error> {
        *self.calls.lock().unwrap().entry(what).or_insert(0) += 1;
        if let Some(lifetime) = &self.on_fetch {
            lifetime.end();
        }
        if self.failing.lock().unwrap().contains(&what) {
            bail!("{} is down", what);
        }
        Ok(())
    }
}

impl InventoryApi for FakeApi {
    fn users(&self) -> Result<Vec<User>, Error> {
        self.call("users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    fn equipment(&self) -> Result<Vec<Equipment>, Error> {
        self.call("equipment")?;
        Ok(self.equipment.lock().unwrap().clone())
    }

    fn components(&self) -> Result<Vec<Component>, Error> {
        self.call("components")?;
        Ok(components())
    }

    fn security_equipment(&self) -> Result<Vec<SecurityEquipment>, Error> {
        self.call("security_equipment")?;
        Ok(security_equipment())
    }

    fn assignment(&self, id: i64) -> Result<AssignmentRecord, Error> {
        self.call("assignment")?;
        match id {
            42 => Ok(record_42()),
            _ => bail!("no assignment {}", id),
        }
    }

    fn create_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.submitted.lock().unwrap().push(("create", payload.clone()));
        self.call("create")
    }

    fn update_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.submitted.lock().unwrap().push(("update", payload.clone()));
        self.call("update")
    }

    fn assignments(&self) -> Result<Vec<AssignmentSummary>, Error> {
        self.call("assignments")?;
        Ok(self.summaries.lock().unwrap().clone())
    }

    fn assignments_of_kind(&self, kind: AssignmentKind) -> Result<Vec<AssignmentSummary>, Error> {
        self.call(kind.as_param())?;
        match kind {
            AssignmentKind::Equipment => Ok(self.summaries.lock().unwrap().clone()),
            AssignmentKind::Keyboards | AssignmentKind::Mice => Ok(keyboard_summaries()),
        }
    }

    fn delete_assignment(&self, id: i64) -> Result<(), Error> {
        self.call("delete")?;
        self.summaries.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    fn user(&self, id: i64) -> Result<User, Error> {
        self.call("user")?;
        let users = self.users.lock().unwrap();
        match users.iter().find(|u| u.id == Some(id)) {
            Some(user) => Ok(user.clone()),
            None => bail!("no user {}", id),
        }
    }

    fn create_user(&self, payload: &UserPayload) -> Result<(), Error> {
        self.write("create_user", payload)
    }

    fn update_user(&self, payload: &UserPayload) -> Result<(), Error> {
        self.write("update_user", payload)
    }

    fn delete_user(&self, id: i64) -> Result<(), Error> {
        self.call("delete_user")?;
        self.users.lock().unwrap().retain(|u| u.id != Some(id));
        Ok(())
    }

    fn create_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error> {
        self.write("create_equipment", payload)
    }

    fn update_equipment(&self, payload: &EquipmentPayload) -> Result<(), Error> {
        self.write("update_equipment", payload)
    }

    fn delete_equipment(&self, id: i64) -> Result<(), Error> {
        self.call("delete_equipment")?;
        self.equipment.lock().unwrap().retain(|e| e.id != Some(id));
        Ok(())
    }

    fn create_component(&self, payload: &ComponentRegistration) -> Result<(), Error> {
        self.write("create_component", payload)
    }

    fn create_security_equipment(&self, payload: &SecurityEquipmentPayload) -> Result<(), Error> {
        self.write("create_security_equipment", payload)
    }
}

/// A context backed by `api`, recording every notice.
pub(crate) fn ctx(api: FakeApi) -> (Ctx, Arc<FakeApi>, Arc<RecordingNotifier>) {
    let api = Arc::new(api);
    let notices = Arc::new(RecordingNotifier::new());
    let ctx = Ctx::new(api.clone(), notices.clone());
    (ctx, api, notices)
}
