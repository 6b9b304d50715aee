//! Reader session: the event loop between a host and the coordinator.
//!
//! ```text
//! SessionMsg::Navigate ──► Session ──spawn──► LoadCoordinator
//!        ▲                                        │
//!        └────────── ChannelHost::go_to ◄─────────┘ (redirect)
//! ```
//!
//! The loop claims the coordinator's loading guard for each event in arrival
//! order. A claimed event finishes as its own task; an event that arrives
//! while a load is in flight is dropped on the spot instead of queueing.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::core::{BasePath, Location};
use crate::coordinator::{LoadCoordinator, Transition};
use crate::host::Host;
use crate::transport::Transport;

/// Messages to the session loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMsg {
    /// The host moved to a new location.
    Navigate(Location),
    /// Stop accepting events, finish in-flight work.
    Shutdown,
}

/// Sending half of a session channel.
pub type SessionTx = mpsc::UnboundedSender<SessionMsg>;

/// Create the channel that connects a [`ChannelHost`] to a [`Session`].
pub fn channel() -> (SessionTx, mpsc::UnboundedReceiver<SessionMsg>) {
    mpsc::unbounded_channel()
}

// ============================================================================
// ChannelHost
// ============================================================================

/// Host that turns redirects into navigation events on the session channel.
#[derive(Debug)]
pub struct ChannelHost {
    base: BasePath,
    tx: SessionTx,
    title: Mutex<String>,
}

impl ChannelHost {
    pub fn new(base: BasePath, tx: SessionTx) -> Self {
        Self {
            base,
            tx,
            title: Mutex::new(String::new()),
        }
    }

    /// Current page title (empty until the first titled article loads).
    pub fn title(&self) -> String {
        self.title.lock().clone()
    }

    /// Feed a location into the session.
    pub fn navigate(&self, location: Location) -> bool {
        self.tx.send(SessionMsg::Navigate(location)).is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(SessionMsg::Shutdown);
    }
}

impl Host for ChannelHost {
    fn go_to(&self, id: &str) {
        let location = Location::at_path(self.base.join(id));
        if !self.navigate(location) {
            crate::debug!("session"; "closed, redirect to {} lost", id);
        }
    }

    fn set_title(&self, title: &str) {
        *self.title.lock() = title.to_string();
    }
}

// ============================================================================
// Session
// ============================================================================

/// Event loop feeding navigation events to a coordinator.
pub struct Session<T, H> {
    coordinator: Arc<LoadCoordinator<T, H>>,
    rx: mpsc::UnboundedReceiver<SessionMsg>,
}

impl<T: Transport, H: Host> Session<T, H> {
    pub fn new(
        coordinator: Arc<LoadCoordinator<T, H>>,
        rx: mpsc::UnboundedReceiver<SessionMsg>,
    ) -> Self {
        Self { coordinator, rx }
    }

    /// Run until `Shutdown` or until every sender is gone.
    ///
    /// Returns the transitions after in-flight loads and prefetches have
    /// finished. Dropped events are recorded on arrival, the rest on
    /// completion.
    pub async fn run(mut self) -> Vec<Transition> {
        let mut tasks: JoinSet<Transition> = JoinSet::new();
        let mut transitions = Vec::new();

        crate::debug!("session"; "start");
        loop {
            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(SessionMsg::Navigate(location)) => {
                        match self.coordinator.try_begin(&location) {
                            Some(previous) => {
                                let coordinator = Arc::clone(&self.coordinator);
                                tasks.spawn(async move {
                                    coordinator.complete(location, previous).await
                                });
                            }
                            None => record(&mut transitions, Ok(Transition::Dropped)),
                        }
                    }
                    Some(SessionMsg::Shutdown) | None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    record(&mut transitions, joined);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            record(&mut transitions, joined);
        }
        self.coordinator.settle().await;
        crate::debug!("session"; "stopped after {} events", transitions.len());
        transitions
    }
}

fn record(
    transitions: &mut Vec<Transition>,
    joined: Result<Transition, tokio::task::JoinError>,
) {
    match joined {
        Ok(transition) => {
            crate::debug!("session"; "{:?}", transition);
            transitions.push(transition);
        }
        Err(e) => crate::log!("error"; "navigation task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ArticleCache;
    use crate::coordinator::{CoordinatorOptions, LoadState};
    use crate::transport::ScriptedTransport;
    use tokio::sync::Notify;

    type Setup = (
        Arc<LoadCoordinator<ScriptedTransport, ChannelHost>>,
        Arc<ChannelHost>,
        Session<ScriptedTransport, ChannelHost>,
    );

    fn setup(ids: &[&str]) -> Setup {
        setup_with(Arc::new(ScriptedTransport::with_articles(ids)))
    }

    fn setup_with(transport: Arc<ScriptedTransport>) -> Setup {
        let (tx, rx) = channel();
        let host = Arc::new(ChannelHost::new(BasePath::default(), tx));
        let coordinator = Arc::new(LoadCoordinator::new(
            transport,
            Arc::clone(&host),
            Arc::new(ArticleCache::new()),
            CoordinatorOptions {
                base: BasePath::default(),
                prefetch: false,
            },
        ));
        let session = Session::new(Arc::clone(&coordinator), rx);
        (coordinator, host, session)
    }

    #[test]
    fn test_channel_host_redirect_targets_concrete_address() {
        let (tx, mut rx) = channel();
        let host = ChannelHost::new(BasePath::new("/notes"), tx);
        host.go_to("second");
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionMsg::Navigate(Location::at_path("/notes/second"))
        );
    }

    #[test]
    fn test_channel_host_title() {
        let (tx, _rx) = channel();
        let host = ChannelHost::new(BasePath::default(), tx);
        assert_eq!(host.title(), "");
        host.set_title("Title 1");
        assert_eq!(host.title(), "Title 1");
    }

    #[test]
    fn test_go_to_after_close_is_harmless() {
        let (tx, rx) = channel();
        drop(rx);
        let host = ChannelHost::new(BasePath::default(), tx);
        host.go_to("a");
        assert!(!host.navigate(Location::default()));
    }

    #[tokio::test]
    async fn test_root_address_redirects_then_loads() {
        let (coordinator, host, session) = setup(&["1", "2"]);
        let mut view = coordinator.subscribe();
        let running = tokio::spawn(session.run());

        host.navigate(Location::at_path("/blog/"));
        view.wait_for(|v| v.state.is_settled()).await.unwrap();
        host.shutdown();

        let transitions = running.await.unwrap();
        assert_eq!(
            transitions,
            [
                Transition::Redirected("1".into()),
                Transition::Loaded("1".into())
            ]
        );
        assert_eq!(coordinator.view().current_id, "1");
        assert_eq!(host.title(), "Title 1");
    }

    #[tokio::test]
    async fn test_sequential_navigation() {
        let (coordinator, host, session) = setup(&["a", "b"]);
        let mut view = coordinator.subscribe();
        let running = tokio::spawn(session.run());

        host.navigate(Location::at_path("/blog/b"));
        view.wait_for(|v| v.current_id == "b").await.unwrap();
        host.navigate(Location::new("/blog/b", "", "a"));
        view.wait_for(|v| v.current_id == "a").await.unwrap();
        host.shutdown();

        let transitions = running.await.unwrap();
        assert_eq!(transitions.len(), 2);
        assert!(matches!(coordinator.state(), LoadState::Ready(_)));
        assert_eq!(host.title(), "Title a");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_back_to_back_events_keep_arrival_order() {
        for _ in 0..50 {
            let gate = Arc::new(Notify::new());
            let transport = Arc::new(
                ScriptedTransport::with_articles(&["a", "b", "c"]).gated(Arc::clone(&gate)),
            );
            let (coordinator, host, session) = setup_with(Arc::clone(&transport));
            let mut view = coordinator.subscribe();

            host.navigate(Location::at_path("/blog/b"));
            host.navigate(Location::at_path("/blog/c"));
            let running = tokio::spawn(session.run());

            view.wait_for(|v| v.state.is_loading()).await.unwrap();
            gate.notify_one();
            view.wait_for(|v| v.state.is_settled()).await.unwrap();
            host.shutdown();

            let transitions = running.await.unwrap();
            assert_eq!(
                transitions,
                [Transition::Dropped, Transition::Loaded("b".into())]
            );
            assert_eq!(coordinator.view().current_id, "b");
            assert_eq!(transport.article_calls(), ["b"]);
        }
    }

    #[tokio::test]
    async fn test_shutdown_without_events() {
        let (coordinator, host, session) = setup(&["a"]);
        host.shutdown();
        assert!(session.run().await.is_empty());
        assert_eq!(coordinator.state(), LoadState::Idle);
    }
}
