use std::thread;

use crate::ctx::{Ctx, Lifetime};
use crate::form::{AssignmentForm, ComponentField, DeviceField, FormError, ListKind, RowId};
use crate::loader;
use crate::notify::Notice;
use crate::reference::{ReferenceData, SelectOption, Selector};
use crate::submit::{self, Mode};

/// Where the user ends up after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    AssignmentList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordState {
    /// Creating, there's nothing to load.
    NotNeeded,
    Pending,
    Loaded,
    Failed(String),
}

/// The create/update screen for an assignment. One type serves both: `Mode::Create` starts from
/// an empty form, `Mode::Update` hydrates it from the server.
#[derive(Debug)]
pub struct AssignmentEditor<'a> {
    ctx: &'a Ctx,
    mode: Mode,
    lifetime: Lifetime,
    reference: ReferenceData,
    form: AssignmentForm,
    record: RecordState,
}

impl<'a> AssignmentEditor<'a> {
    pub fn open(ctx: &'a Ctx, mode: Mode) -> AssignmentEditor<'a> {
        AssignmentEditor::open_with_lifetime(ctx, mode, Lifetime::new())
    }

    /// Open the editor, loading the reference data and (when updating) the record concurrently.
    /// Anything that resolves after `lifetime` has ended is thrown away.
    pub fn open_with_lifetime(ctx: &'a Ctx, mode: Mode, lifetime: Lifetime) -> AssignmentEditor<'a> {
        let mut editor = AssignmentEditor {
            ctx,
            mode,
            lifetime,
            reference: ReferenceData::new(),
            form: AssignmentForm::new(),
            record: match mode {
                Mode::Create => RecordState::NotNeeded,
                Mode::Update(_) => RecordState::Pending,
            },
        };

        let api = ctx.api();
        let lifetime = &editor.lifetime;
        let (reference, record) = thread::scope(|s| {
            let record = match mode {
                Mode::Update(id) if lifetime.is_alive() => {
                    Some(s.spawn(move || loader::load_record(api, id)))
                }
                _ => None,
            };
            let reference = ReferenceData::load(api, lifetime);
            let record = record.map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(format_err!("loading the assignment panicked")))
            });
            (reference, record)
        });

        editor.reference = reference;
        if let Some(result) = record {
            editor.apply_record(result);
        }
        editor
    }

    fn apply_record(&mut self, result: Result<AssignmentForm, failure::Error>) {
        if !self.lifetime.is_alive() {
            debug!("Discarding loaded assignment, the editor is closed");
            return;
        }
        match result {
            Ok(form) => {
                self.form = form;
                self.record = RecordState::Loaded;
            }
            Err(e) => {
                error!("Error loading assignment: {}", e);
                self.ctx.notify(Notice::error(
                    "Error",
                    "No se pudo cargar la asignación. Inténtalo nuevamente.",
                ));
                self.record = RecordState::Failed(e.to_string());
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &AssignmentForm {
        &self.form
    }

    pub fn record_state(&self) -> &RecordState {
        &self.record
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    pub fn user_selector(&mut self) -> Selector {
        self.reference.user_selector()
    }

    pub fn equipment_selector(&mut self) -> Selector {
        self.reference.equipment_selector()
    }

    pub fn component_selector(&mut self) -> Selector {
        self.reference.component_selector()
    }

    pub fn security_equipment_selector(&mut self) -> Selector {
        self.reference.security_equipment_selector()
    }

    pub fn set_scalar_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.form.set_scalar_field(name, value)
    }

    pub fn set_user_selection(&mut self, selected: Option<&SelectOption>) {
        self.form.set_user_selection(selected)
    }

    pub fn set_equipment_selection(&mut self, selected: Option<&SelectOption>) {
        self.form.set_equipment_selection(selected)
    }

    pub fn set_component_line_field(&mut self, index: usize, field: ComponentField, value: &str) -> Result<(), FormError> {
        self.form.set_component_line_field(index, field, value)
    }

    pub fn set_device_line_field(&mut self, index: usize, field: DeviceField, value: &str) -> Result<(), FormError> {
        self.form.set_device_line_field(index, field, value)
    }

    pub fn add_component_line(&mut self) -> RowId {
        self.form.add_component_line()
    }

    pub fn add_device_line(&mut self) -> RowId {
        self.form.add_device_line()
    }

    /// Remove a component row. Returns whether anything was removed; refusing to remove the last
    /// row tells the user why.
    pub fn remove_component_line(&mut self, row_id: RowId) -> bool {
        let result = self.form.remove_component_line(row_id);
        self.removal_outcome(result)
    }

    pub fn remove_device_line(&mut self, row_id: RowId) -> bool {
        let result = self.form.remove_device_line(row_id);
        self.removal_outcome(result)
    }

    fn removal_outcome(&self, result: Result<(), FormError>) -> bool {
        match result {
            Ok(()) => true,
            Err(FormError::LastRow(kind)) => {
                let msg = match kind {
                    ListKind::Components => "Debe haber al menos un componente",
                    ListKind::ExternalDevices => "Debe haber al menos un dispositivo externo",
                };
                self.ctx.notify(Notice::Refused(msg.to_string()));
                false
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Re-run whatever failed to load: reference collections and, when updating, the record.
    pub fn retry(&mut self) {
        let api = self.ctx.api();
        self.reference.retry_failed(api, &self.lifetime);

        if let (Mode::Update(id), RecordState::Failed(_)) = (self.mode, &self.record) {
            if self.lifetime.is_alive() {
                let result = loader::load_record(api, id);
                self.apply_record(result);
            }
        }
    }

    /// Validate, build the payload and send it. On success the editor is closed and the caller
    /// should move to the assignment list; on any failure the form is left exactly as it was.
    ///
    /// This blocks until the service answers, and holds `&mut self` while it does, so a second
    /// submission can't start until the first has finished.
    pub fn submit(&mut self) -> Navigation {
        match self.record {
            RecordState::Failed(_) | RecordState::Pending => {
                self.ctx.notify(Notice::error(
                    "Error",
                    "La asignación no se pudo cargar, no se puede guardar.",
                ));
                return Navigation::Stay;
            }
            RecordState::NotNeeded | RecordState::Loaded => {}
        }

        let payload = match submit::build_payload(&self.form) {
            Ok(payload) => payload,
            Err(e) => {
                info!("Submission blocked: {}", e);
                self.ctx.notify(Notice::Validation(e.to_string()));
                return Navigation::Stay;
            }
        };
        debug!("Submitting {:?}", &payload);

        let mode = Mode::of(&self.form);
        let result = match mode {
            Mode::Create => self.ctx.api().create_assignment(&payload),
            Mode::Update(_) => self.ctx.api().update_assignment(&payload),
        };

        match (result, mode) {
            (Ok(()), Mode::Create) => {
                self.ctx.notify(Notice::Success("Asignación registrada exitosamente".into()));
                self.close();
                Navigation::AssignmentList
            }
            (Ok(()), Mode::Update(_)) => {
                self.ctx.notify(Notice::Success("Asignación actualizada exitosamente".into()));
                self.close();
                Navigation::AssignmentList
            }
            (Err(e), Mode::Create) => {
                error!("Error registering the assignment: {}", e);
                self.ctx.notify(Notice::error(
                    "Error",
                    "No se pudo registrar la asignación. Por favor, inténtalo de nuevo.",
                ));
                Navigation::Stay
            }
            (Err(e), Mode::Update(_)) => {
                error!("Error updating the assignment: {}", e);
                self.ctx.notify(Notice::error(
                    "Error",
                    "No se pudo actualizar la asignación. Por favor, inténtalo de nuevo.",
                ));
                Navigation::Stay
            }
        }
    }

    /// Leave without saving.
    pub fn cancel(&mut self) -> Navigation {
        self.close();
        Navigation::AssignmentList
    }

    /// End the editor's lifetime. Loads still in flight will be discarded when they resolve.
    pub fn close(&self) {
        self.lifetime.end();
    }
}

impl<'a> Drop for AssignmentEditor<'a> {
    fn drop(&mut self) {
        self.close();
    }
}
