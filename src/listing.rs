use std::io;

use failure::Error;
use handlebars::TemplateRenderError;

use crate::catalog::{any_contains, Page, Pagination, NOTHING_TO_EXPORT};
use crate::ctx::Ctx;
use crate::formatting::{display_date, gigabytes, handlebars, or_missing, value_text, with_qualifier, write_csv};
use crate::messages::{AssignmentDetail, AssignmentKind, AssignmentSummary, ComponentDetail, EquipmentDetail};
use crate::notify::Notice;
use crate::reference::LoadState;

/// One assignment, flattened for display. Only the first detail entry is shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRow {
    pub id: i64,
    pub date: String,
    pub user_name: String,
    pub area: String,
    pub department: String,
    pub equipment_kind: String,
    pub equipment_brand: String,
    pub equipment_model: String,
    pub equipment_serial_number: String,
    pub ip_address: String,
    pub network_cpu_ip: String,
    pub cpu: String,
    pub ram: String,
    pub disk_brand: String,
    pub disk_model: String,
    pub disk_capacity: String,
    pub partition_c: String,
    pub partition_d: String,
    pub partition_e: String,
    pub component_kind: String,
    pub component_brand: String,
    pub keyboard_language: String,
    pub component_serial_number: String,
    pub security_kind: String,
    pub security_brand: String,
    pub security_model: String,
    pub security_capacity: String,
    pub security_serial_number: String,
}

impl AssignmentRow {
    pub fn from_summary(summary: &AssignmentSummary) -> AssignmentRow {
        let empty_detail = AssignmentDetail::default();
        let detail = summary
            .details
            .as_ref()
            .and_then(|details| details.first())
            .unwrap_or(&empty_detail);
        let empty_equipment = EquipmentDetail::default();
        let equipment = detail.equipment.as_ref().unwrap_or(&empty_equipment);
        let disk = equipment.disk.as_ref();
        let empty_component = ComponentDetail::default();
        let component = detail.component.as_ref().unwrap_or(&empty_component);
        let security = detail.security_equipment.as_ref();
        let user = summary.user.as_ref();

        AssignmentRow {
            id: summary.id,
            date: display_date(summary.assignment_date.as_deref()),
            user_name: or_missing(user.and_then(|u| u.name.as_deref())),
            area: or_missing(user.and_then(|u| u.area.as_deref())),
            department: or_missing(user.and_then(|u| u.department.as_deref())),
            equipment_kind: or_missing(equipment.kind.as_deref()),
            equipment_brand: or_missing(equipment.brand.as_deref()),
            equipment_model: or_missing(equipment.model.as_deref()),
            equipment_serial_number: or_missing(detail.equipment_serial_number.as_deref()),
            ip_address: or_missing(detail.ip_address.as_deref()),
            network_cpu_ip: or_missing(detail.network_cpu_ip.as_deref()),
            cpu: with_qualifier(
                equipment.processor.clone().filter(|p| !p.trim().is_empty()),
                equipment.processor_speed.as_ref().and_then(value_text),
                true,
            ),
            ram: with_qualifier(
                equipment.ram.as_ref().and_then(value_text),
                equipment.ram_kind.clone().filter(|k| !k.trim().is_empty()),
                false,
            ),
            disk_brand: or_missing(disk.and_then(|d| d.brand.as_deref())),
            disk_model: or_missing(disk.and_then(|d| d.model.as_deref())),
            disk_capacity: gigabytes(disk.and_then(|d| d.capacity.as_ref())),
            partition_c: gigabytes(disk.and_then(|d| d.c.as_ref())),
            partition_d: gigabytes(disk.and_then(|d| d.d.as_ref())),
            partition_e: gigabytes(disk.and_then(|d| d.e.as_ref())),
            component_kind: or_missing(component.kind.as_deref()),
            component_brand: or_missing(component.brand.as_deref()),
            keyboard_language: or_missing(component.keyboard_language.as_deref()),
            component_serial_number: or_missing(detail.component_serial_number.as_deref()),
            security_kind: or_missing(security.and_then(|s| s.kind.as_deref())),
            security_brand: or_missing(security.and_then(|s| s.brand.as_deref())),
            security_model: or_missing(security.and_then(|s| s.model.as_deref())),
            security_capacity: or_missing(
                security
                    .and_then(|s| s.capacity.as_ref())
                    .and_then(value_text)
                    .as_deref(),
            ),
            security_serial_number: or_missing(detail.security_equipment_serial_number.as_deref()),
        }
    }
}

/// Whether `summary` matches a search term. User name, area and department match without regard
/// to case; the id matches on its decimal text. A blank term matches everything.
pub fn matches(summary: &AssignmentSummary, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let user_match = summary.user.as_ref().map_or(false, |user| {
        any_contains(
            &[user.name.as_deref(), user.area.as_deref(), user.department.as_deref()],
            &needle,
        )
    });
    user_match || summary.id.to_string().contains(term)
}

/// A line of the complete assignments export.
#[derive(Debug, Serialize)]
pub struct AssignmentExport<'r> {
    #[serde(rename = "ID Asignación")]
    id: i64,
    #[serde(rename = "Fecha Asignación")]
    date: &'r str,
    #[serde(rename = "Nombre Usuario")]
    user_name: &'r str,
    #[serde(rename = "Área")]
    area: &'r str,
    #[serde(rename = "Departamento")]
    department: &'r str,
    #[serde(rename = "Tipo de Equipo")]
    equipment_kind: &'r str,
    #[serde(rename = "Marca Equipo")]
    equipment_brand: &'r str,
    #[serde(rename = "Modelo Equipo")]
    equipment_model: &'r str,
    #[serde(rename = "Número de Serie Equipo")]
    equipment_serial_number: &'r str,
    #[serde(rename = "IP Address")]
    ip_address: &'r str,
    #[serde(rename = "IP CPU Red")]
    network_cpu_ip: &'r str,
    #[serde(rename = "CPU")]
    cpu: &'r str,
    #[serde(rename = "RAM")]
    ram: &'r str,
    #[serde(rename = "Marca Disco")]
    disk_brand: &'r str,
    #[serde(rename = "Modelo Disco")]
    disk_model: &'r str,
    #[serde(rename = "Almacenamiento Disco")]
    disk_capacity: &'r str,
    #[serde(rename = "Partición C")]
    partition_c: &'r str,
    #[serde(rename = "Partición D")]
    partition_d: &'r str,
    #[serde(rename = "Partición E")]
    partition_e: &'r str,
    #[serde(rename = "Marca Equipo Seguridad")]
    security_brand: &'r str,
    #[serde(rename = "Modelo Equipo Seguridad")]
    security_model: &'r str,
    #[serde(rename = "Capacidad Equipo Seguridad")]
    security_capacity: &'r str,
    #[serde(rename = "Tipo Equipo Seguridad")]
    security_kind: &'r str,
    #[serde(rename = "Número de Serie Equipo Seguridad")]
    security_serial_number: &'r str,
}

impl<'r> From<&'r AssignmentRow> for AssignmentExport<'r> {
    fn from(row: &'r AssignmentRow) -> AssignmentExport<'r> {
        AssignmentExport {
            id: row.id,
            date: &row.date,
            user_name: &row.user_name,
            area: &row.area,
            department: &row.department,
            equipment_kind: &row.equipment_kind,
            equipment_brand: &row.equipment_brand,
            equipment_model: &row.equipment_model,
            equipment_serial_number: &row.equipment_serial_number,
            ip_address: &row.ip_address,
            network_cpu_ip: &row.network_cpu_ip,
            cpu: &row.cpu,
            ram: &row.ram,
            disk_brand: &row.disk_brand,
            disk_model: &row.disk_model,
            disk_capacity: &row.disk_capacity,
            partition_c: &row.partition_c,
            partition_d: &row.partition_d,
            partition_e: &row.partition_e,
            security_brand: &row.security_brand,
            security_model: &row.security_model,
            security_capacity: &row.security_capacity,
            security_kind: &row.security_kind,
            security_serial_number: &row.security_serial_number,
        }
    }
}

/// A line of the keyboard and mouse exports.
#[derive(Debug, Serialize)]
pub struct ComponentAssignmentExport<'r> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Fecha Asignación")]
    date: &'r str,
    #[serde(rename = "Nombre Usuario")]
    user_name: &'r str,
    #[serde(rename = "Área")]
    area: &'r str,
    #[serde(rename = "Departamento")]
    department: &'r str,
    #[serde(rename = "Tipo de Componente")]
    component_kind: &'r str,
    #[serde(rename = "Marca")]
    component_brand: &'r str,
    #[serde(rename = "Idioma")]
    keyboard_language: &'r str,
    #[serde(rename = "Número de Serie")]
    component_serial_number: &'r str,
}

impl<'r> From<&'r AssignmentRow> for ComponentAssignmentExport<'r> {
    fn from(row: &'r AssignmentRow) -> ComponentAssignmentExport<'r> {
        ComponentAssignmentExport {
            id: row.id,
            date: &row.date,
            user_name: &row.user_name,
            area: &row.area,
            department: &row.department,
            component_kind: &row.component_kind,
            component_brand: &row.component_brand,
            keyboard_language: &row.keyboard_language,
            component_serial_number: &row.component_serial_number,
        }
    }
}

/// The assignment list screen. Without a kind it shows every assignment; with one, only the
/// assignments of equipment, keyboards or mice.
#[derive(Debug)]
pub struct AssignmentListing<'a> {
    ctx: &'a Ctx,
    kind: Option<AssignmentKind>,
    rows: LoadState<AssignmentSummary>,
    search: String,
    pages: Pagination,
}

impl<'a> AssignmentListing<'a> {
    pub fn new(ctx: &'a Ctx) -> AssignmentListing<'a> {
        AssignmentListing {
            ctx,
            kind: None,
            rows: LoadState::Pending,
            search: String::new(),
            pages: Pagination::new(ctx.page_size),
        }
    }

    pub fn of_kind(ctx: &'a Ctx, kind: AssignmentKind) -> AssignmentListing<'a> {
        AssignmentListing {
            kind: Some(kind),
            ..AssignmentListing::new(ctx)
        }
    }

    pub fn kind(&self) -> Option<AssignmentKind> {
        self.kind
    }

    fn title(&self) -> &'static str {
        match self.kind {
            None => "ASIGNACIONES",
            Some(AssignmentKind::Equipment) => "EQUIPOS ASIGNADOS",
            Some(AssignmentKind::Keyboards) => "TECLADOS ASIGNADOS",
            Some(AssignmentKind::Mice) => "MOUSE ASIGNADOS",
        }
    }

    fn load_failed(&self) -> &'static str {
        match self.kind {
            None => "No se pudieron cargar las asignaciones.",
            Some(AssignmentKind::Equipment) => {
                "No se pudieron cargar las asignaciones de equipos. Intente nuevamente."
            }
            Some(AssignmentKind::Keyboards) => {
                "No se pudieron cargar las asignaciones de teclados. Intente nuevamente."
            }
            Some(AssignmentKind::Mice) => "No se pudieron cargar las asignaciones de mouse.",
        }
    }

    /// Fetch every assignment. The current page is kept, clamped to what now exists.
    pub fn fetch(&mut self) -> bool {
        let result = match self.kind {
            None => self.ctx.api().assignments(),
            Some(kind) => self.ctx.api().assignments_of_kind(kind),
        };
        match result {
            Ok(rows) => {
                info!("Loaded {} assignments", rows.len());
                self.rows = LoadState::Loaded(rows);
                self.set_page(self.page_index());
                true
            }
            Err(e) => {
                error!("Error loading assignments: {}", e);
                self.ctx.notify(Notice::error("Error", self.load_failed()));
                if let LoadState::Pending = self.rows {
                    self.rows = LoadState::Failed(e.to_string());
                }
                false
            }
        }
    }

    pub fn state(&self) -> &LoadState<AssignmentSummary> {
        &self.rows
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Changing the search term always starts again from the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.pages.set(0, 0);
    }

    pub fn filtered(&self) -> Vec<&AssignmentSummary> {
        self.rows
            .items()
            .iter()
            .filter(|summary| matches(summary, &self.search))
            .collect()
    }

    pub fn page_index(&self) -> usize {
        self.pages.index()
    }

    pub fn page_size(&self) -> usize {
        self.pages.size()
    }

    /// Never less than one, even with nothing to show.
    pub fn page_count(&self) -> usize {
        self.pages.count(self.filtered().len())
    }

    pub fn set_page(&mut self, index: usize) {
        let total = self.filtered().len();
        self.pages.set(index, total);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page_index() + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page_index().saturating_sub(1));
    }

    /// The rows on the current page.
    pub fn page(&self) -> Vec<AssignmentRow> {
        self.pages
            .window(self.filtered())
            .map(AssignmentRow::from_summary)
            .collect()
    }

    /// Delete an assignment, then refetch. Nothing is removed locally; on failure the rows stay
    /// as they were.
    pub fn delete(&mut self, id: i64) -> bool {
        match self.ctx.api().delete_assignment(id) {
            Ok(()) => {
                info!("Deleted assignment {}", id);
                self.ctx.notify(Notice::Success("La asignación ha sido eliminada.".into()));
                self.fetch();
                true
            }
            Err(e) => {
                error!("Error deleting assignment {}: {}", id, e);
                self.ctx.notify(Notice::error("Error", "No se pudo eliminar la asignación."));
                false
            }
        }
    }

    /// Write every assignment matching the search as csv, not only the current page. Keyboard
    /// and mouse views export their component columns instead of the equipment ones.
    pub fn export<W: io::Write>(&self, out: W) -> Result<usize, Error> {
        let rows: Vec<AssignmentRow> = self
            .filtered()
            .into_iter()
            .map(AssignmentRow::from_summary)
            .collect();
        if rows.is_empty() {
            self.ctx.notify(Notice::Validation(NOTHING_TO_EXPORT.into()));
            return Ok(0);
        }
        match self.kind {
            Some(kind) if kind.is_component() => {
                write_csv(out, rows.iter().map(ComponentAssignmentExport::from))
            }
            _ => write_csv(out, rows.iter().map(AssignmentExport::from)),
        }
    }

    pub fn to_plaintext(&self) -> Result<String, TemplateRenderError> {
        let rows = self.page();
        let page = Page {
            title: self.title(),
            page: self.page_index() + 1,
            page_count: self.page_count(),
            total: self.filtered().len(),
            rows: &rows,
        };
        let template = match self.kind {
            Some(kind) if kind.is_component() => COMPONENT_LISTING_TEMPLATE,
            _ => LISTING_TEMPLATE,
        };
        handlebars().render_template(template, &page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::User;
    use crate::test_helpers::{self, FakeApi};

    fn summary(id: i64, name: &str) -> AssignmentSummary {
        AssignmentSummary {
            id,
            user: Some(User {
                id: Some(id),
                name: Some(name.into()),
                area: Some("Operaciones".into()),
                department: Some("Logística".into()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_row_flattens_first_detail() {
        let rows = test_helpers::summaries();
        let row = AssignmentRow::from_summary(&rows[0]);

        assert_eq!(row.date, "05-03-2024");
        assert_eq!(row.user_name, "Ana Torres");
        assert_eq!(row.cpu, "i5 (2.4 GHz)");
        assert_eq!(row.ram, "16 DDR4");
        assert_eq!(row.disk_capacity, "512 GB");
        assert_eq!(row.network_cpu_ip, "Sin datos");
        assert_eq!(row.security_brand, "Sin datos");
    }

    #[test]
    fn test_row_without_details() {
        let rows = test_helpers::summaries();
        let row = AssignmentRow::from_summary(&rows[1]);

        assert_eq!(row.department, "Sin datos");
        assert_eq!(row.equipment_kind, "Sin datos");
        assert_eq!(row.cpu, "Sin datos");
        assert_eq!(row.disk_capacity, "Sin datos");
    }

    #[test]
    fn test_search() {
        let ana = summary(1, "Ana Torres");
        assert!(matches(&ana, ""));
        assert!(matches(&ana, "   "));
        assert!(matches(&ana, "TORRES"));
        assert!(matches(&ana, "logíst"));
        assert!(matches(&ana, "1"));
        assert!(!matches(&ana, "Luis"));

        let nobody = AssignmentSummary {
            id: 12,
            ..Default::default()
        };
        assert!(matches(&nobody, "12"));
        assert!(!matches(&nobody, "ana"));
    }

    #[test]
    fn test_pagination_clamps() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        assert_eq!(listing.page_count(), 1);

        listing.rows = LoadState::Loaded((1..=25).map(|id| summary(id, "Ana")).collect());
        assert_eq!(listing.page_size(), 10);
        assert_eq!(listing.page_count(), 3);

        listing.set_page(7);
        assert_eq!(listing.page_index(), 2);
        assert_eq!(listing.page().len(), 5);

        listing.next_page();
        assert_eq!(listing.page_index(), 2);
        listing.previous_page();
        listing.previous_page();
        listing.previous_page();
        assert_eq!(listing.page_index(), 0);
    }

    #[test]
    fn test_search_resets_page() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.rows = LoadState::Loaded((1..=25).map(|id| summary(id, "Ana")).collect());
        listing.set_page(2);

        listing.set_search("2");
        assert_eq!(listing.page_index(), 0);
        // 2, 12, 20..=25
        assert_eq!(listing.filtered().len(), 8);

        listing.set_search("nobody");
        assert_eq!(listing.page_count(), 1);
        assert!(listing.page().is_empty());
    }

    #[test]
    fn test_delete_refetches() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        assert!(listing.fetch());
        assert_eq!(listing.filtered().len(), 2);

        assert!(listing.delete(12));
        assert_eq!(api.calls("assignments"), 2);
        assert_eq!(listing.filtered().len(), 1);
        assert_eq!(notices.last(), Some(Notice::Success("La asignación ha sido eliminada.".into())));
    }

    #[test]
    fn test_failed_delete_leaves_rows() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.fetch();
        api.fail_delete();

        assert!(!listing.delete(12));
        assert_eq!(api.calls("assignments"), 1);
        assert_eq!(listing.filtered().len(), 2);
        assert!(notices.last().unwrap().is_error());
    }

    #[test]
    fn test_failed_fetch_notifies() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        api.fail_listing();
        let mut listing = AssignmentListing::new(&ctx);

        assert!(!listing.fetch());
        assert!(listing.state().is_failed());
        assert!(notices.last().unwrap().is_error());
    }

    #[test]
    fn test_export_writes_every_filtered_row() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.fetch();

        let mut out = vec![];
        assert_eq!(listing.export(&mut out).unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID Asignación,Fecha Asignación,Nombre Usuario,Área,Departamento,"));
        assert!(lines[0].ends_with(",Número de Serie Equipo Seguridad"));
        assert!(lines[1].starts_with("1,05-03-2024,Ana Torres,TI,Soporte,Laptop,Dell,Latitude,EQ-1,"));
        assert!(lines[1].contains(",512 GB,200 GB,312 GB,Sin datos,"));
        assert!(lines[2].starts_with("12,01-04-2024,Luis Mora,Finanzas,Sin datos,"));
    }

    #[test]
    fn test_export_ignores_pagination_but_not_search() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.rows = LoadState::Loaded((1..=25).map(|id| summary(id, "Ana")).collect());
        listing.set_page(2);

        let mut out = vec![];
        assert_eq!(listing.export(&mut out).unwrap(), 25);

        listing.set_search("2");
        let mut out = vec![];
        assert_eq!(listing.export(&mut out).unwrap(), 8);
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let (ctx, _api, notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.fetch();
        listing.set_search("nobody");

        let mut out = vec![];
        assert_eq!(listing.export(&mut out).unwrap(), 0);
        assert!(out.is_empty());
        assert_eq!(notices.last(), Some(Notice::Validation(NOTHING_TO_EXPORT.into())));
    }

    #[test]
    fn test_keyboard_view() {
        let (ctx, api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::of_kind(&ctx, AssignmentKind::Keyboards);
        assert!(listing.fetch());
        assert_eq!(api.calls("teclados"), 1);
        assert_eq!(api.calls("assignments"), 0);

        let expected = "\
TECLADOS ASIGNADOS
==================

Página 1 de 1 (1 asignaciones)

#30 10-05-2024 Ana Torres (TI / Soporte)
    Componente: Teclado Logitech, serie KB-9
    Idioma: Español
";
        assert_eq!(listing.to_plaintext().unwrap(), expected);

        let mut out = vec![];
        listing.export(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Fecha Asignación,Nombre Usuario,Área,Departamento,Tipo de Componente,Marca,Idioma,Número de Serie\n\
             30,10-05-2024,Ana Torres,TI,Soporte,Teclado,Logitech,Español,KB-9\n"
        );
    }

    #[test]
    fn test_failed_view_fetch_names_the_view() {
        let (ctx, api, notices) = test_helpers::ctx(FakeApi::new());
        api.fail_call("mouse");
        let mut listing = AssignmentListing::of_kind(&ctx, AssignmentKind::Mice);

        assert!(!listing.fetch());
        assert_eq!(
            notices.last(),
            Some(Notice::error("Error", "No se pudieron cargar las asignaciones de mouse."))
        );
    }

    #[test]
    fn test_plaintext() {
        let (ctx, _api, _notices) = test_helpers::ctx(FakeApi::new());
        let mut listing = AssignmentListing::new(&ctx);
        listing.fetch();
        listing.set_search("ana");

        let expected = "\
ASIGNACIONES
============

Página 1 de 1 (1 asignaciones)

#1 05-03-2024 Ana Torres (TI / Soporte)
    Equipo: Laptop Dell Latitude, serie EQ-1
    IP: 10.0.0.1, IP CPU red: Sin datos
    CPU: i5 (2.4 GHz), RAM: 16 DDR4
    Disco: Samsung EVO 512 GB
    Seguridad: Sin datos Sin datos Sin datos, serie Sin datos
";
        assert_eq!(listing.to_plaintext().unwrap(), expected);
    }
}

static LISTING_TEMPLATE: &'static str = "\
{{header title}}

Página {{page}} de {{page_count}} ({{total}} asignaciones)
{{#each rows}}
#{{this.id}} {{this.date}} {{this.user_name}} ({{this.area}} / {{this.department}})
    Equipo: {{this.equipment_kind}} {{this.equipment_brand}} {{this.equipment_model}}, serie {{this.equipment_serial_number}}
    IP: {{this.ip_address}}, IP CPU red: {{this.network_cpu_ip}}
    CPU: {{this.cpu}}, RAM: {{this.ram}}
    Disco: {{this.disk_brand}} {{this.disk_model}} {{this.disk_capacity}}
    Seguridad: {{this.security_kind}} {{this.security_brand}} {{this.security_model}}, serie {{this.security_serial_number}}
{{/each}}\
";

static COMPONENT_LISTING_TEMPLATE: &'static str = "\
{{header title}}

Página {{page}} de {{page_count}} ({{total}} asignaciones)
{{#each rows}}
#{{this.id}} {{this.date}} {{this.user_name}} ({{this.area}} / {{this.department}})
    Componente: {{this.component_kind}} {{this.component_brand}}, serie {{this.component_serial_number}}
    Idioma: {{this.keyboard_language}}
{{/each}}\
";
