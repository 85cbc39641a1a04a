use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use failure::Error;

use crate::client::{InventoryApi, InventoryClient};
use crate::config;
use crate::notify::{ConsoleNotifier, Notice, Notify};
use crate::session::{Session, SessionStorage};

/// Ctx is the context object handed to every screen. Constructed from a `config::Config` and the
/// session storage, or directly from its parts in tests.
pub struct Ctx {
    api: Arc<dyn InventoryApi>,
    notifier: Arc<dyn Notify + Send + Sync>,
    pub page_size: usize,
}

impl fmt::Debug for Ctx {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Ctx")
            .field("api", &"InventoryApi { ... }")
            .field("notifier", &"Notify { ... }")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl Ctx {
    pub fn new(api: Arc<dyn InventoryApi>, notifier: Arc<dyn Notify + Send + Sync>) -> Ctx {
        Ctx {
            api,
            notifier,
            page_size: config::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a context talking to the configured service, authenticated with whatever session is
    /// in `storage`.
    ///
    /// Fails if nobody is logged in; no request is ever issued without a token.
    pub fn create(cfg: &config::Config, storage: &dyn SessionStorage) -> Result<Ctx, Error> {
        let session = Session::from_storage(storage)?;
        info!("Creating client for {} as {}", cfg.api_base(), session.greeting_name());
        let client = InventoryClient::new(cfg.api_base())?.with_session(session);

        let mut ctx = Ctx::new(Arc::new(client), Arc::new(ConsoleNotifier));
        ctx.page_size = cfg.page_size();
        Ok(ctx)
    }

    pub fn api(&self) -> &dyn InventoryApi {
        &*self.api
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice)
    }
}

/// Tracks whether the screen that issued some work is still open. Work that finishes after the
/// lifetime has ended must be thrown away rather than applied.
#[derive(Debug, Clone)]
pub struct Lifetime {
    alive: Arc<AtomicBool>,
}

impl Default for Lifetime {
    fn default() -> Self {
        Lifetime::new()
    }
}

impl Lifetime {
    pub fn new() -> Lifetime {
        Lifetime {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn end(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
