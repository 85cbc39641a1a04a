use std::fmt;
use std::sync::Arc;
use std::thread;

use failure::Error;

use crate::client::InventoryApi;
use crate::ctx::Lifetime;
use crate::messages::{Component, Equipment, SecurityEquipment, User};

/// What a selector shows when its collection couldn't be loaded, or loaded empty.
pub const NO_OPTIONS: &str = "no options available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Equipment,
    Components,
    SecurityEquipment,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Users => "users",
            Collection::Equipment => "equipment",
            Collection::Components => "components",
            Collection::SecurityEquipment => "security equipment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Pending
    }
}

impl<T> LoadState<T> {
    fn from_result(what: Collection, result: Result<Vec<T>, Error>) -> LoadState<T> {
        match result {
            Ok(items) => {
                info!("Loaded {} {}", items.len(), what);
                LoadState::Loaded(items)
            }
            Err(e) => {
                warn!("Error loading {}: {}", what, e);
                LoadState::Failed(e.to_string())
            }
        }
    }

    /// The loaded items, or nothing if the load hasn't finished or failed.
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        match self {
            LoadState::Failed(_) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

/// A reference record that can populate a selection control.
pub trait Selectable {
    fn primary_key(&self) -> Option<i64>;
    fn label_parts(&self) -> Vec<Option<&str>>;

    fn label(&self) -> String {
        self.label_parts()
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

impl Selectable for User {
    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn label_parts(&self) -> Vec<Option<&str>> {
        vec![self.name.as_deref(), self.area.as_deref(), self.department.as_deref()]
    }
}

impl Selectable for Equipment {
    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn label_parts(&self) -> Vec<Option<&str>> {
        vec![
            self.kind.as_deref(),
            self.brand.as_deref(),
            self.model.as_deref(),
            self.processor.as_deref(),
        ]
    }
}

impl Selectable for Component {
    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn label_parts(&self) -> Vec<Option<&str>> {
        vec![self.kind.as_deref(), self.brand.as_deref()]
    }
}

impl Selectable for SecurityEquipment {
    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn label_parts(&self) -> Vec<Option<&str>> {
        vec![self.kind.as_deref(), self.brand.as_deref(), self.model.as_deref()]
    }
}

/// Drop records without a primary key and project the rest into options.
pub fn project<T: Selectable>(source: &[T]) -> Vec<SelectOption> {
    source
        .iter()
        .filter_map(|item| {
            item.primary_key().map(|value| SelectOption {
                value,
                label: item.label(),
            })
        })
        .collect()
}

/// Memoises `project`. Handing it the same source twice returns the very same option list.
#[derive(Debug)]
pub struct Projection<T> {
    source: Option<Vec<T>>,
    options: Arc<Vec<SelectOption>>,
}

impl<T> Default for Projection<T> {
    fn default() -> Self {
        Projection {
            source: None,
            options: Arc::new(vec![]),
        }
    }
}

impl<T: Selectable + Clone + PartialEq> Projection<T> {
    pub fn options(&mut self, source: &[T]) -> Arc<Vec<SelectOption>> {
        if self.source.as_deref() != Some(source) {
            self.options = Arc::new(project(source));
            self.source = Some(source.to_vec());
        }
        Arc::clone(&self.options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Loading,
    Ready,
    Unavailable,
}

/// What a selection control renders: its options plus enough state to show a degraded control
/// rather than breaking the form.
#[derive(Debug, Clone)]
pub struct Selector {
    pub options: Arc<Vec<SelectOption>>,
    pub state: SelectorState,
}

impl Selector {
    fn from_state<T: Selectable + Clone + PartialEq>(state: &LoadState<T>, projection: &mut Projection<T>) -> Selector {
        let selector_state = match state {
            LoadState::Pending => SelectorState::Loading,
            LoadState::Loaded(_) => SelectorState::Ready,
            LoadState::Failed(_) => SelectorState::Unavailable,
        };
        Selector {
            options: projection.options(state.items()),
            state: selector_state,
        }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// The text shown in place of the options when there are none to pick from.
    pub fn empty_text(&self) -> Option<&'static str> {
        if self.has_options() {
            None
        } else {
            Some(NO_OPTIONS)
        }
    }

    /// The option matching a stored id. Nothing is selected until both the options and the id are
    /// present, whichever order they arrive in.
    pub fn selected(&self, value: Option<i64>) -> Option<&SelectOption> {
        value.and_then(|value| self.options.iter().find(|o| o.value == value))
    }

    pub fn option(&self, value: i64) -> Option<&SelectOption> {
        self.selected(Some(value))
    }
}

#[derive(Debug, Clone, Copy)]
struct Wanted {
    users: bool,
    equipment: bool,
    components: bool,
    security_equipment: bool,
}

fn fetch_one<T>(
    lifetime: &Lifetime,
    what: Collection,
    fetch: impl FnOnce() -> Result<Vec<T>, Error>,
) -> Option<LoadState<T>> {
    if !lifetime.is_alive() {
        debug!("Not fetching {}, the form is closed", what);
        return None;
    }
    let result = fetch();
    if !lifetime.is_alive() {
        debug!("Discarding {}, the form closed while they loaded", what);
        return None;
    }
    Some(LoadState::from_result(what, result))
}

/// The four lookup collections the assignment form needs. Each one loads, fails and is stored
/// independently of the others.
#[derive(Debug, Default)]
pub struct ReferenceData {
    pub users: LoadState<User>,
    pub equipment: LoadState<Equipment>,
    pub components: LoadState<Component>,
    pub security_equipment: LoadState<SecurityEquipment>,

    user_projection: Projection<User>,
    equipment_projection: Projection<Equipment>,
    component_projection: Projection<Component>,
    security_equipment_projection: Projection<SecurityEquipment>,
}

impl ReferenceData {
    pub fn new() -> ReferenceData {
        Default::default()
    }

    /// Fetch all four collections concurrently.
    pub fn load(api: &dyn InventoryApi, lifetime: &Lifetime) -> ReferenceData {
        let mut data = ReferenceData::new();
        data.fetch(
            api,
            lifetime,
            Wanted {
                users: true,
                equipment: true,
                components: true,
                security_equipment: true,
            },
        );
        data
    }

    /// Refetch only the collections that failed last time.
    pub fn retry_failed(&mut self, api: &dyn InventoryApi, lifetime: &Lifetime) {
        let wanted = Wanted {
            users: self.users.is_failed(),
            equipment: self.equipment.is_failed(),
            components: self.components.is_failed(),
            security_equipment: self.security_equipment.is_failed(),
        };
        self.fetch(api, lifetime, wanted);
    }

    pub fn failures(&self) -> Vec<Collection> {
        let mut failed = vec![];
        if self.users.is_failed() {
            failed.push(Collection::Users);
        }
        if self.equipment.is_failed() {
            failed.push(Collection::Equipment);
        }
        if self.components.is_failed() {
            failed.push(Collection::Components);
        }
        if self.security_equipment.is_failed() {
            failed.push(Collection::SecurityEquipment);
        }
        failed
    }

    fn fetch(&mut self, api: &dyn InventoryApi, lifetime: &Lifetime, wanted: Wanted) {
        let (users, equipment, components, security_equipment) = thread::scope(|s| {
            let users = s.spawn(move || {
                if wanted.users {
                    fetch_one(lifetime, Collection::Users, || api.users())
                } else {
                    None
                }
            });
            let equipment = s.spawn(move || {
                if wanted.equipment {
                    fetch_one(lifetime, Collection::Equipment, || api.equipment())
                } else {
                    None
                }
            });
            let components = s.spawn(move || {
                if wanted.components {
                    fetch_one(lifetime, Collection::Components, || api.components())
                } else {
                    None
                }
            });
            let security_equipment = s.spawn(move || {
                if wanted.security_equipment {
                    fetch_one(lifetime, Collection::SecurityEquipment, || api.security_equipment())
                } else {
                    None
                }
            });

            (
                users.join().unwrap_or_else(|_| Some(panicked(Collection::Users))),
                equipment.join().unwrap_or_else(|_| Some(panicked(Collection::Equipment))),
                components.join().unwrap_or_else(|_| Some(panicked(Collection::Components))),
                security_equipment
                    .join()
                    .unwrap_or_else(|_| Some(panicked(Collection::SecurityEquipment))),
            )
        });

        if let Some(state) = users {
            self.users = state;
        }
        if let Some(state) = equipment {
            self.equipment = state;
        }
        if let Some(state) = components {
            self.components = state;
        }
        if let Some(state) = security_equipment {
            self.security_equipment = state;
        }
    }

    pub fn user_selector(&mut self) -> Selector {
        Selector::from_state(&self.users, &mut self.user_projection)
    }

    pub fn equipment_selector(&mut self) -> Selector {
        Selector::from_state(&self.equipment, &mut self.equipment_projection)
    }

    pub fn component_selector(&mut self) -> Selector {
        Selector::from_state(&self.components, &mut self.component_projection)
    }

    pub fn security_equipment_selector(&mut self) -> Selector {
        Selector::from_state(&self.security_equipment, &mut self.security_equipment_projection)
    }
}

fn panicked<T>(what: Collection) -> LoadState<T> {
    error!("Fetching {} panicked", what);
    LoadState::Failed(format!("fetching {} panicked", what))
}
