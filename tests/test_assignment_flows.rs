use std::sync::{Arc, Mutex};

use failure::{bail, Error};

use inventario::client::InventoryApi;
use inventario::ctx::Ctx;
use inventario::editor::{AssignmentEditor, Navigation};
use inventario::form::ComponentField;
use inventario::messages::*;
use inventario::notify::{Notice, RecordingNotifier};
use inventario::reference::{SelectorState, NO_OPTIONS};
use inventario::submit::Mode;

/// Just enough of the inventory service to drive the editor end to end.
#[derive(Default)]
struct Service {
    components_down: bool,
    sent: Mutex<Vec<serde_json::Value>>,
}

impl Service {
    fn sent(&self) -> Vec<serde_json::Value> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.sent.lock().unwrap().push(serde_json::to_value(payload)?);
        Ok(())
    }
}

impl InventoryApi for Service {
    fn users(&self) -> Result<Vec<User>, Error> {
        Ok(vec![User {
            id: Some(7),
            name: Some("Ana Torres".into()),
            area: Some("TI".into()),
            department: Some("Soporte".into()),
        }])
    }

    fn equipment(&self) -> Result<Vec<Equipment>, Error> {
        Ok(vec![Equipment {
            id: Some(3),
            kind: Some("Laptop".into()),
            ..Default::default()
        }])
    }

    fn components(&self) -> Result<Vec<Component>, Error> {
        if self.components_down {
            bail!("503 Service Unavailable");
        }
        Ok(vec![Component {
            id: Some(5),
            kind: Some("Monitor".into()),
            brand: Some("LG".into()),
        }])
    }

    fn security_equipment(&self) -> Result<Vec<SecurityEquipment>, Error> {
        Ok(vec![SecurityEquipment {
            id: Some(4),
            kind: Some("UPS".into()),
            ..Default::default()
        }])
    }

    fn assignment(&self, id: i64) -> Result<AssignmentRecord, Error> {
        if id != 42 {
            bail!("404 Not Found");
        }
        let record = serde_json::json!({
            "idAsignacion": 42,
            "idUsuario": 7,
            "idEquipo": 3,
            "numSerieEquipo": "EQ-42",
            "fechaAsignacion": "2024-03-05T00:00:00",
            "componentes": [
                {"idComponente": 5, "numSerieComponente": "MON-1"},
                {"idComponente": 6, "numSerieComponente": "KB-1"}
            ],
            "dispositivosExt": []
        });
        Ok(serde_json::from_value(record)?)
    }

    fn create_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.record(payload)
    }

    fn update_assignment(&self, payload: &AssignmentPayload) -> Result<(), Error> {
        self.record(payload)
    }

    fn assignments(&self) -> Result<Vec<AssignmentSummary>, Error> {
        Ok(vec![])
    }

    fn assignments_of_kind(&self, _kind: AssignmentKind) -> Result<Vec<AssignmentSummary>, Error> {
        Ok(vec![])
    }

    fn delete_assignment(&self, _id: i64) -> Result<(), Error> {
        Ok(())
    }

    fn user(&self, id: i64) -> Result<User, Error> {
        bail!("404 Not Found: user {}", id)
    }

    fn create_user(&self, _payload: &UserPayload) -> Result<(), Error> {
        bail!("not used here")
    }

    fn update_user(&self, _payload: &UserPayload) -> Result<(), Error> {
        bail!("not used here")
    }

    fn delete_user(&self, _id: i64) -> Result<(), Error> {
        bail!("not used here")
    }

    fn create_equipment(&self, _payload: &EquipmentPayload) -> Result<(), Error> {
        bail!("not used here")
    }

    fn update_equipment(&self, _payload: &EquipmentPayload) -> Result<(), Error> {
        bail!("not used here")
    }

    fn delete_equipment(&self, _id: i64) -> Result<(), Error> {
        bail!("not used here")
    }

    fn create_component(&self, _payload: &ComponentRegistration) -> Result<(), Error> {
        bail!("not used here")
    }

    fn create_security_equipment(&self, _payload: &SecurityEquipmentPayload) -> Result<(), Error> {
        bail!("not used here")
    }
}

fn ctx(service: Service) -> (Ctx, Arc<Service>, Arc<RecordingNotifier>) {
    let service = Arc::new(service);
    let notices = Arc::new(RecordingNotifier::new());
    (Ctx::new(service.clone(), notices.clone()), service, notices)
}

#[test]
fn test_create_drops_incomplete_component_rows() {
    let (ctx, service, _notices) = ctx(Service::default());
    let mut editor = AssignmentEditor::open(&ctx, Mode::Create);

    assert_eq!(editor.form().components().len(), 1);
    assert_eq!(editor.form().external_devices().len(), 1);
    assert_eq!(
        editor.form().assignment_date,
        chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
    );

    let ana = editor.user_selector().option(7).cloned();
    editor.set_user_selection(ana.as_ref());
    editor.add_component_line();
    editor.set_component_line_field(0, ComponentField::ComponentId, "5").unwrap();
    editor.set_component_line_field(0, ComponentField::SerialNumber, "MON-1").unwrap();
    editor.set_component_line_field(1, ComponentField::ComponentId, "5").unwrap();

    assert_eq!(editor.submit(), Navigation::AssignmentList);

    let sent = service.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["idUsuario"], 7);
    assert_eq!(sent[0]["componentes"].as_array().unwrap().len(), 1);
    assert_eq!(sent[0]["dispositivosExt"].as_array().unwrap().len(), 0);
    assert!(sent[0].get("idAsignacion").is_none());
}

#[test]
fn test_update_after_removing_a_component() {
    let (ctx, service, notices) = ctx(Service::default());
    let mut editor = AssignmentEditor::open(&ctx, Mode::Update(42));

    assert_eq!(editor.form().components().len(), 2);
    assert_eq!(editor.form().external_devices().len(), 1);

    let second = editor.form().components()[1].row_id;
    assert!(editor.remove_component_line(second));

    assert_eq!(editor.submit(), Navigation::AssignmentList);
    assert_eq!(notices.last(), Some(Notice::Success("Asignación actualizada exitosamente".into())));

    let sent = service.sent();
    assert_eq!(sent[0]["idAsignacion"], 42);
    assert_eq!(sent[0]["fechaAsignacion"], "2024-03-05T00:00:00.000Z");
    let components = sent[0]["componentes"].as_array().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["numSerieComponente"], "MON-1");
    for component in components {
        assert_eq!(component.as_object().unwrap().len(), 2);
    }
}

#[test]
fn test_clearing_the_user_blocks_submission() {
    let (ctx, service, notices) = ctx(Service::default());
    let mut editor = AssignmentEditor::open(&ctx, Mode::Update(42));
    let before_ids: Vec<_> = editor.form().components().iter().map(|l| l.row_id).collect();

    editor.set_user_selection(None);
    assert_eq!(editor.submit(), Navigation::Stay);

    assert!(service.sent().is_empty());
    match notices.last() {
        Some(Notice::Validation(_)) => {}
        other => panic!("expected a validation notice, got {:?}", other),
    }
    let after_ids: Vec<_> = editor.form().components().iter().map(|l| l.row_id).collect();
    assert_eq!(before_ids, after_ids);
}

#[test]
fn test_component_outage_degrades_only_its_selector() {
    let service = Service {
        components_down: true,
        ..Default::default()
    };
    let (ctx, _service, _notices) = ctx(service);
    let mut editor = AssignmentEditor::open(&ctx, Mode::Create);

    let components = editor.component_selector();
    assert_eq!(components.state, SelectorState::Unavailable);
    assert_eq!(components.empty_text(), Some(NO_OPTIONS));

    for selector in vec![
        editor.user_selector(),
        editor.equipment_selector(),
        editor.security_equipment_selector(),
    ] {
        assert_eq!(selector.state, SelectorState::Ready);
        assert!(selector.has_options());
    }
}

#[test]
fn test_unknown_assignment_cannot_be_saved() {
    let (ctx, service, notices) = ctx(Service::default());
    let mut editor = AssignmentEditor::open(&ctx, Mode::Update(404));

    assert!(notices.last().unwrap().is_error());
    assert_eq!(editor.submit(), Navigation::Stay);
    assert!(service.sent().is_empty());
}
