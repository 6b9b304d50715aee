//! Load Coordinator - the reader's single source of truth
//!
//! Owns the current article, the load state and the sibling links, and
//! drives resolution, caching and fetching for every navigation event:
//!
//! ```text
//! location ─► catalog (once) ─► resolve ─► redirect? ─► unchanged?
//!                                                         │
//!            prefetch siblings ◄── links ◄── publish ◄── cache / fetch
//! ```
//!
//! # Loading guard
//!
//! At most one load is in flight. A navigation event that arrives while
//! the state is `Loading` is dropped, not queued; the in-flight load
//! finishes against the location it captured.
//!
//! # Prefetch
//!
//! After a successful load, uncached siblings are fetched in the
//! background. Prefetch only ever writes to the cache and sibling titles;
//! failures are logged and otherwise ignored.

mod state;

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tokio::sync::{OnceCell, watch};
use tokio::task::JoinSet;

use crate::article::Article;
use crate::cache::ArticleCache;
use crate::catalog::Catalog;
use crate::core::{BasePath, Location};
use crate::error::ReaderError;
use crate::host::Host;
use crate::navigation::{self, NavigationLinks};
use crate::resolve::{LocationResolver, ResolvedBy};
use crate::transport::Transport;

pub use state::{LoadState, ReaderView, Transition};

/// Coordinator settings.
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    /// Base path for links, redirects and the resolver prefix pattern.
    pub base: BasePath,
    /// Fetch uncached siblings in the background after each load.
    pub prefetch: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            base: BasePath::default(),
            prefetch: true,
        }
    }
}

/// Result of the suspendable part of a load.
enum Step {
    /// Root address: ask the host for the concrete address instead.
    Redirect(String),
    /// Already showing this article.
    Unchanged(String),
    Loaded {
        id: String,
        article: Arc<Article>,
        catalog: Arc<Catalog>,
    },
}

/// Orchestrates resolution, cache and transport for one reader session.
pub struct LoadCoordinator<T, H> {
    transport: Arc<T>,
    host: Arc<H>,
    cache: Arc<ArticleCache>,
    catalog: OnceCell<Arc<Catalog>>,
    resolver: LocationResolver,
    prefetch: bool,
    view: Arc<watch::Sender<ReaderView>>,
    /// Outstanding prefetch tasks.
    prefetches: Mutex<JoinSet<()>>,
    /// Ids with a prefetch in flight.
    pending: Arc<Mutex<FxHashSet<String>>>,
}

impl<T: Transport, H: Host> LoadCoordinator<T, H> {
    pub fn new(
        transport: Arc<T>,
        host: Arc<H>,
        cache: Arc<ArticleCache>,
        options: CoordinatorOptions,
    ) -> Self {
        let (view, _) = watch::channel(ReaderView::default());
        Self {
            transport,
            host,
            cache,
            catalog: OnceCell::new(),
            resolver: LocationResolver::new(options.base),
            prefetch: options.prefetch,
            view: Arc::new(view),
            prefetches: Mutex::new(JoinSet::new()),
            pending: Arc::new(Mutex::new(FxHashSet::default())),
        }
    }

    // ========================================================================
    // accessors
    // ========================================================================

    pub fn base(&self) -> &BasePath {
        self.resolver.base()
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.cache
    }

    /// Catalog, if it has been fetched.
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }

    /// Snapshot of what the presentation layer should show.
    pub fn view(&self) -> ReaderView {
        self.view.borrow().clone()
    }

    pub fn state(&self) -> LoadState {
        self.view.borrow().state.clone()
    }

    /// Receiver notified on every state or link change.
    pub fn subscribe(&self) -> watch::Receiver<ReaderView> {
        self.view.subscribe()
    }

    // ========================================================================
    // navigation
    // ========================================================================

    /// Handle a navigation event from the host.
    pub async fn on_location_change(&self, location: Location) -> Transition {
        match self.try_begin(&location) {
            Some(previous) => self.complete(location, previous).await,
            None => Transition::Dropped,
        }
    }

    /// Claim the loading guard for `location`.
    ///
    /// Returns the state the guard replaced, or `None` when a load is already
    /// in flight and the event must be dropped. Callers that dispatch events
    /// concurrently claim here, in arrival order, before spawning
    /// [`complete`](Self::complete).
    pub fn try_begin(&self, location: &Location) -> Option<LoadState> {
        let mut previous = LoadState::Idle;
        let entered = self.view.send_if_modified(|view| {
            if view.state.is_loading() {
                return false;
            }
            previous = std::mem::replace(&mut view.state, LoadState::Loading);
            true
        });
        if !entered {
            crate::debug!("load"; "busy, dropped {}", location);
            return None;
        }
        Some(previous)
    }

    /// Finish a load whose guard was claimed by [`try_begin`](Self::try_begin).
    pub async fn complete(&self, location: Location, previous: LoadState) -> Transition {
        crate::debug!("load"; "{}", location);
        match self.load(&location, &previous).await {
            Ok(Step::Redirect(id)) => {
                self.view.send_modify(|view| view.state = previous);
                crate::debug!("load"; "root address, redirecting to {}", id);
                self.host.go_to(&id);
                Transition::Redirected(id)
            }
            Ok(Step::Unchanged(id)) => {
                self.view.send_modify(|view| view.state = previous);
                Transition::Unchanged(id)
            }
            Ok(Step::Loaded {
                id,
                article,
                catalog,
            }) => {
                self.publish(&id, article, &catalog);
                Transition::Loaded(id)
            }
            Err(err) => {
                let message = err.user_message();
                crate::log!("error"; "{}: {}", location, message);
                self.view
                    .send_modify(|view| view.state = LoadState::Error(message));
                Transition::Failed(err)
            }
        }
    }

    /// Suspendable part of a load: catalog, resolution, cache or fetch.
    async fn load(&self, location: &Location, previous: &LoadState) -> Result<Step, ReaderError> {
        let catalog = self.fetch_catalog().await?;

        let resolution = self.resolver.resolve(&catalog, location);
        if resolution.is_empty() {
            return Err(ReaderError::NoResolvableArticle);
        }
        let id = resolution.id;

        if resolution.by == ResolvedBy::Fallback && self.base().is_root(&location.path) {
            return Ok(Step::Redirect(id));
        }

        if matches!(previous, LoadState::Ready(_)) && self.view.borrow().current_id == id {
            return Ok(Step::Unchanged(id));
        }

        let article = match self.cache.get(&id) {
            Some(article) => {
                crate::debug!("load"; "cache hit: {}", id);
                article
            }
            None => {
                let article = self
                    .transport
                    .fetch_article(&id)
                    .await
                    .map_err(|e| ReaderError::article(&id, &e))?;
                let article = Arc::new(article);
                self.cache.put(id.clone(), Arc::clone(&article));
                article
            }
        };

        Ok(Step::Loaded {
            id,
            article,
            catalog,
        })
    }

    /// Fetch the catalog once; a cached catalog is never fetched again.
    async fn fetch_catalog(&self) -> Result<Arc<Catalog>, ReaderError> {
        self.catalog
            .get_or_try_init(|| async {
                let response = self.transport.fetch_catalog().await?;
                let catalog = Catalog::non_empty(response.ids)?;
                self.prime(&catalog, response.primed);
                crate::debug!("load"; "catalog: {} articles", catalog.len());
                Ok::<_, ReaderError>(Arc::new(catalog))
            })
            .await
            .cloned()
    }

    /// Store articles delivered with the catalog, ignoring unknown ids.
    fn prime(&self, catalog: &Catalog, primed: Vec<Article>) {
        for article in primed {
            if catalog.contains(&article.id) {
                self.cache.put(article.id.clone(), article);
            } else {
                crate::debug!("load"; "ignoring primed article `{}`: not in catalog", article.id);
            }
        }
    }

    /// Publish a loaded article, update the title, then prefetch siblings.
    fn publish(&self, id: &str, article: Arc<Article>, catalog: &Catalog) {
        let links = navigation::compute(catalog, id, self.base()).with_titles(&self.cache);
        let title = article.title().map(str::to_string);

        self.view.send_modify(|view| {
            view.state = LoadState::Ready(article);
            view.current_id = id.to_string();
            view.links = links.clone();
        });

        if let Some(title) = title {
            self.host.set_title(&title);
        }
        crate::debug!("load"; "ready: {}", id);

        if self.prefetch {
            self.prefetch_siblings(&links);
        }
    }

    // ========================================================================
    // prefetch
    // ========================================================================

    /// Fire-and-forget fetch of uncached siblings.
    fn prefetch_siblings(&self, links: &NavigationLinks) {
        let mut tasks = self.prefetches.lock();
        while tasks.try_join_next().is_some() {}

        for id in links.sibling_ids() {
            if self.cache.has(id) || !self.pending.lock().insert(id.to_string()) {
                continue;
            }

            let id = id.to_string();
            let transport = Arc::clone(&self.transport);
            let cache = Arc::clone(&self.cache);
            let pending = Arc::clone(&self.pending);
            let view = Arc::clone(&self.view);

            tasks.spawn(async move {
                match transport.fetch_article(&id).await {
                    Ok(article) => {
                        fill_sibling_title(&view, &id, &article.title);
                        cache.put(id.clone(), article);
                        crate::debug!("prefetch"; "cached {}", id);
                    }
                    Err(e) => crate::debug!("prefetch"; "{} failed: {}", id, e),
                }
                pending.lock().remove(&id);
            });
        }
    }

    /// Wait for outstanding prefetch tasks to finish.
    pub async fn settle(&self) {
        loop {
            let mut tasks = std::mem::take(&mut *self.prefetches.lock());
            if tasks.is_empty() {
                break;
            }
            while tasks.join_next().await.is_some() {}
        }
    }
}

/// Show a prefetched sibling's title if it is still a sibling.
fn fill_sibling_title(view: &watch::Sender<ReaderView>, id: &str, title: &str) {
    view.send_if_modified(|view| {
        let links = &mut view.links;
        if links.prev_id == id && links.prev_title != title {
            links.prev_title = title.to_string();
            true
        } else if links.next_id == id && links.next_title != title {
            links.next_title = title.to_string();
            true
        } else {
            false
        }
    });
}
