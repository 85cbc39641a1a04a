use std::fmt::Debug;
use std::io;

use failure::Error;
use handlebars::TemplateRenderError;
use serde::Serialize;

use crate::client::InventoryApi;
use crate::ctx::Ctx;
use crate::formatting::{handlebars, write_csv};
use crate::notify::Notice;
use crate::reference::LoadState;

/// Shown instead of writing an empty export.
pub const NOTHING_TO_EXPORT: &str = "No se puede generar el archivo si no hay registros.";

/// Which page of a filtered list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    index: usize,
    size: usize,
}

impl Pagination {
    pub fn new(size: usize) -> Pagination {
        Pagination {
            index: 0,
            size: size.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Never less than one, even with nothing to show.
    pub fn count(&self, total: usize) -> usize {
        ((total + self.size - 1) / self.size).max(1)
    }

    pub fn set(&mut self, index: usize, total: usize) {
        self.index = index.min(self.count(total) - 1);
    }

    pub fn window<T, I: IntoIterator<Item = T>>(&self, items: I) -> impl Iterator<Item = T> {
        items.into_iter().skip(self.index * self.size).take(self.size)
    }
}

/// The user facing texts of one kind of catalog.
#[derive(Debug)]
pub struct Texts {
    pub title: &'static str,
    pub load_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
}

/// Something a catalog screen can list, search, delete and export.
pub trait Entry: Clone + Debug + Sized {
    /// Flattened for the plaintext rendering.
    type Row: Serialize;
    /// One line of the csv export. Field names become the header.
    type Export: Serialize;

    const TEXTS: Texts;
    /// Renders a `Page` of `Row`s.
    const TEMPLATE: &'static str;

    fn fetch(api: &dyn InventoryApi) -> Result<Vec<Self>, Error>;
    fn delete(api: &dyn InventoryApi, id: i64) -> Result<(), Error>;

    fn id(&self) -> Option<i64>;
    /// `needle` is already trimmed and lowercased, and never empty.
    fn matches(&self, needle: &str) -> bool;
    fn row(&self) -> Self::Row;
    fn export_row(&self) -> Self::Export;
}

/// Case insensitive substring match over whichever fields are present.
pub fn any_contains(fields: &[Option<&str>], needle: &str) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

#[derive(Debug, Serialize)]
pub(crate) struct Page<'r, R> {
    pub title: &'static str,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub rows: &'r [R],
}

/// A searchable, paginated list of `E`, eg the users screen.
#[derive(Debug)]
pub struct Catalog<'a, E> {
    ctx: &'a Ctx,
    rows: LoadState<E>,
    search: String,
    pages: Pagination,
}

impl<'a, E: Entry> Catalog<'a, E> {
    pub fn new(ctx: &'a Ctx) -> Catalog<'a, E> {
        Catalog {
            ctx,
            rows: LoadState::Pending,
            search: String::new(),
            pages: Pagination::new(ctx.page_size),
        }
    }

    /// Fetch everything. A failed refetch keeps whatever was loaded before.
    pub fn fetch(&mut self) -> bool {
        match E::fetch(self.ctx.api()) {
            Ok(rows) => {
                info!("Loaded {} rows for {}", rows.len(), E::TEXTS.title);
                self.rows = LoadState::Loaded(rows);
                self.set_page(self.pages.index());
                true
            }
            Err(e) => {
                error!("Error loading {}: {}", E::TEXTS.title, e);
                self.ctx.notify(Notice::error("Error de conexión", E::TEXTS.load_failed));
                if let LoadState::Pending = self.rows {
                    self.rows = LoadState::Failed(e.to_string());
                }
                false
            }
        }
    }

    pub fn state(&self) -> &LoadState<E> {
        &self.rows
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.pages.set(0, 0);
    }

    pub fn filtered(&self) -> Vec<&E> {
        let needle = self.search.trim().to_lowercase();
        self.rows
            .items()
            .iter()
            .filter(|entry| needle.is_empty() || entry.matches(&needle))
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.rows.items().iter().find(|entry| entry.id() == Some(id))
    }

    pub fn page_index(&self) -> usize {
        self.pages.index()
    }

    pub fn page_count(&self) -> usize {
        self.pages.count(self.filtered().len())
    }

    pub fn set_page(&mut self, index: usize) {
        let total = self.filtered().len();
        self.pages.set(index, total);
    }

    pub fn page(&self) -> Vec<E::Row> {
        self.pages.window(self.filtered()).map(E::row).collect()
    }

    /// Delete on the server, then refetch. Nothing is removed locally.
    pub fn delete(&mut self, id: i64) -> bool {
        match E::delete(self.ctx.api(), id) {
            Ok(()) => {
                info!("Deleted {} from {}", id, E::TEXTS.title);
                self.ctx.notify(Notice::Success(E::TEXTS.deleted.into()));
                self.fetch();
                true
            }
            Err(e) => {
                error!("Error deleting {} from {}: {}", id, E::TEXTS.title, e);
                self.ctx.notify(Notice::error("Error", E::TEXTS.delete_failed));
                false
            }
        }
    }

    /// Write every row matching the search, not only the current page.
    pub fn export<W: io::Write>(&self, out: W) -> Result<usize, Error> {
        let rows = self.filtered();
        if rows.is_empty() {
            self.ctx.notify(Notice::Validation(NOTHING_TO_EXPORT.into()));
            return Ok(0);
        }
        write_csv(out, rows.into_iter().map(E::export_row))
    }

    pub fn to_plaintext(&self) -> Result<String, TemplateRenderError> {
        let rows = self.page();
        let page = Page {
            title: E::TEXTS.title,
            page: self.pages.index() + 1,
            page_count: self.page_count(),
            total: self.filtered().len(),
            rows: &rows,
        };
        handlebars().render_template(E::TEMPLATE, &page)
    }
}

/// Notify the outcome of a write. `failure` is the title and text of the error notice.
pub(crate) fn report(ctx: &Ctx, result: Result<(), Error>, success: &str, failure: (&str, &str)) -> bool {
    match result {
        Ok(()) => {
            ctx.notify(Notice::Success(success.into()));
            true
        }
        Err(e) => {
            error!("{}: {}", failure.0, e);
            ctx.notify(Notice::error(failure.0, failure.1));
            false
        }
    }
}
