use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::types::{Account, AccountProfile};
use crate::api::{GithubClient, GithubError};
use crate::store::{StateCell, ViewState};

/// The data-gateway call a pipeline drives, injected at construction.
pub type FetchFn<Q, T> = Arc<dyn Fn(Q) -> BoxFuture<'static, Result<T, GithubError>> + Send + Sync>;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Turns query events into at-most-one in-flight gateway request and drives
/// the screen's [`StateCell`] through Idle -> Loading -> Success | Failure.
///
/// Every accepted query bumps a revision counter; superseding a revision
/// cancels its debounce timer and in-flight request through that revision's
/// cancellation token, and the commit path additionally drops any result
/// whose revision is no longer the latest. Failures land in the state cell
/// as an error string; the pipeline stays usable afterwards.
pub struct Pipeline<Q, T> {
    fetch: FetchFn<Q, T>,
    state: StateCell<ViewState<T>>,
    revision: Arc<AtomicU64>,
    cancel: Option<CancellationToken>,
    inflight: Option<JoinHandle<()>>,
    committed: Option<Q>,
}

impl<Q, T> Pipeline<Q, T>
where
    Q: Clone + Send + 'static,
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new(
        fetch: impl Fn(Q) -> BoxFuture<'static, Result<T, GithubError>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            fetch: Arc::new(fetch),
            state: StateCell::default(),
            revision: Arc::new(AtomicU64::new(0)),
            cancel: None,
            inflight: None,
            committed: None,
        }
    }

    /// The cell the presentation layer renders from.
    pub fn state(&self) -> &StateCell<ViewState<T>> {
        &self.state
    }

    /// Whether a debounce timer or gateway request is currently outstanding.
    pub fn is_pending(&self) -> bool {
        self.inflight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Issue a request immediately (screen-entry path).
    pub fn enter(&mut self, query: Q) {
        self.start(query, None);
    }

    /// Issue a request after a quiet period (interactive-typing path).
    pub fn submit(&mut self, query: Q, debounce: Duration) {
        self.start(query, Some(debounce));
    }

    /// Cancel outstanding work and reset the screen to idle.
    pub fn clear(&mut self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
        self.cancel_inflight();
        self.committed = None;
        self.state.set(ViewState::default());
    }

    /// Re-issue the committed query under a new revision. No-op while a
    /// request is pending or before anything has been committed, so a
    /// refresh key held down cannot stack requests.
    pub fn refresh(&mut self) {
        if self.is_pending() {
            return;
        }
        let Some(query) = self.committed.clone() else {
            return;
        };
        self.start(query, None);
    }

    fn start(&mut self, query: Q, delay: Option<Duration>) {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_inflight();
        self.committed = Some(query.clone());

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let latest = Arc::clone(&self.revision);
        let state = self.state.clone();
        let fut = (self.fetch)(query);
        tracing::debug!(revision, debounced = delay.is_some(), "query accepted");

        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            state.set(ViewState::loading());

            let outcome = tokio::select! {
                _ = token.cancelled() => return,
                outcome = fut => outcome,
            };

            // A result may only commit if its revision is still the latest.
            if latest.load(Ordering::SeqCst) != revision {
                tracing::debug!(revision, "dropping stale result");
                return;
            }

            match outcome {
                Ok(data) => state.set(ViewState::ready(data)),
                Err(e) => state.set(ViewState::failed(e.to_string())),
            }
        });

        self.inflight = Some(handle);
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.inflight = None;
    }
}

impl<Q, T> Drop for Pipeline<Q, T> {
    fn drop(&mut self) {
        // Tearing down a screen cancels its outstanding work.
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Screen pipelines
// ---------------------------------------------------------------------------

pub type ListPipeline = Pipeline<u64, Vec<Account>>;
pub type ProfilePipeline = Pipeline<u64, Option<AccountProfile>>;

impl ListPipeline {
    pub fn followers(client: Arc<GithubClient>) -> Self {
        Self::new(move |id| {
            let client = Arc::clone(&client);
            Box::pin(async move { client.get_followers(id).await })
        })
    }

    pub fn following(client: Arc<GithubClient>) -> Self {
        Self::new(move |id| {
            let client = Arc::clone(&client);
            Box::pin(async move { client.get_following(id).await })
        })
    }
}

impl ProfilePipeline {
    pub fn profile(client: Arc<GithubClient>) -> Self {
        Self::new(move |id| {
            let client = Arc::clone(&client);
            Box::pin(async move { client.get_user(id).await.map(Some) })
        })
    }
}

// ---------------------------------------------------------------------------
// Search pipeline
// ---------------------------------------------------------------------------

/// Search-screen front end over [`Pipeline`]: a synchronously updated
/// raw-input cell plus the minimum-length and debounce rules.
pub struct SearchPipeline {
    pipeline: Pipeline<String, Vec<Account>>,
    input: StateCell<String>,
    debounce: Duration,
    min_query_len: usize,
}

impl SearchPipeline {
    pub fn new(
        fetch: impl Fn(String) -> BoxFuture<'static, Result<Vec<Account>, GithubError>>
        + Send
        + Sync
        + 'static,
        debounce: Duration,
        min_query_len: usize,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(fetch),
            input: StateCell::new(String::new()),
            debounce,
            min_query_len,
        }
    }

    /// A search pipeline wired to the GitHub search endpoint.
    pub fn github(
        client: Arc<GithubClient>,
        per_page: u32,
        debounce: Duration,
        min_query_len: usize,
    ) -> Self {
        Self::new(
            move |query: String| {
                let client = Arc::clone(&client);
                Box::pin(async move { client.search_users(&query, per_page).await })
            },
            debounce,
            min_query_len,
        )
    }

    /// The raw input text, updated synchronously on every keystroke so the
    /// input widget never lags behind typing.
    pub fn input(&self) -> &StateCell<String> {
        &self.input
    }

    pub fn state(&self) -> &StateCell<ViewState<Vec<Account>>> {
        self.pipeline.state()
    }

    pub fn is_pending(&self) -> bool {
        self.pipeline.is_pending()
    }

    /// Record a keystroke. Queries below the minimum length reset the screen
    /// to idle; anything longer schedules a debounced search.
    pub fn on_query_changed(&mut self, text: String) {
        self.input.set(text.clone());
        if text.chars().count() < self.min_query_len {
            self.pipeline.clear();
        } else {
            self.pipeline.submit(text, self.debounce);
        }
    }

    /// Re-run the last committed search, if any.
    pub fn refresh(&mut self) {
        self.pipeline.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn counting_search(
        calls: Arc<AtomicUsize>,
        queries: Arc<Mutex<Vec<String>>>,
    ) -> impl Fn(String) -> BoxFuture<'static, Result<Vec<Account>, GithubError>> + Send + Sync
    {
        move |query: String| {
            let calls = Arc::clone(&calls);
            let queries = Arc::clone(&queries);
            // Count inside the future: a debounced query that never fires
            // must not register as a call.
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                queries.lock().unwrap().push(query);
                Ok(Vec::new())
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_settles_idle_without_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut search = SearchPipeline::new(
            counting_search(Arc::clone(&calls), queries),
            Duration::from_millis(100),
            3,
        );

        search.on_query_changed("de".to_string());
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(search.state().get(), ViewState::default());
        assert_eq!(search.input().get(), "de");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_coalesces_to_one_call_for_last_text() {
        let calls = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut search = SearchPipeline::new(
            counting_search(Arc::clone(&calls), Arc::clone(&queries)),
            Duration::from_millis(100),
            3,
        );

        for text in ["den", "denr", "denreyes"] {
            search.on_query_changed(text.to_string());
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*queries.lock().unwrap(), vec!["denreyes".to_string()]);
        let state = search.state().get();
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_result_never_overwrites_newer_revision() {
        let mut pipeline: Pipeline<String, Vec<String>> = Pipeline::new(|query: String| {
            Box::pin(async move {
                let delay = if query == "slow" { 500 } else { 10 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(vec![query])
            })
        });

        // Record every value the cell ever holds.
        let history = Arc::new(Mutex::new(Vec::new()));
        let mut rx = pipeline.state().subscribe();
        let observer = {
            let history = Arc::clone(&history);
            tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    history.lock().unwrap().push(rx.borrow().clone());
                }
            })
        };

        pipeline.enter("slow".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        pipeline.enter("fast".to_string());
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(pipeline.state().get().data, vec!["fast".to_string()]);
        let seen = history.lock().unwrap();
        assert!(
            !seen.iter().any(|s| s.data.contains(&"slow".to_string())),
            "superseded result leaked into the state cell",
        );
        observer.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_is_noop_while_pending_and_reissues_after() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline: Pipeline<u64, Vec<String>> = Pipeline::new({
            let calls = Arc::clone(&calls);
            move |id: u64| {
                let calls = Arc::clone(&calls);
                Box::pin(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(vec![id.to_string()])
                })
            }
        });

        pipeline.enter(9638030);
        tokio::time::sleep(Duration::from_millis(50)).await;
        pipeline.refresh();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "refresh while pending must not double-trigger");

        pipeline.refresh();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pipeline.state().get().data, vec!["9638030".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_without_committed_query_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut search = SearchPipeline::new(
            counting_search(Arc::clone(&calls), queries),
            Duration::from_millis(100),
            3,
        );

        search.refresh();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Shrinking below the threshold clears the committed query too.
        search.on_query_changed("denreyes".to_string());
        search.on_query_changed("de".to_string());
        search.refresh();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_surfaces_error_and_pipeline_recovers() {
        let mut pipeline: Pipeline<String, Vec<String>> = Pipeline::new(|query: String| {
            Box::pin(async move {
                if query == "bad" {
                    Err(GithubError::NotFound)
                } else {
                    Ok(vec![query])
                }
            })
        });

        pipeline.enter("bad".to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = pipeline.state().get();
        assert!(!state.is_loading);
        assert!(state.data.is_empty());
        assert_eq!(state.error.as_deref(), Some("not found"));

        pipeline.enter("good".to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = pipeline.state().get();
        assert_eq!(state.data, vec!["good".to_string()]);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_resets_state_after_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut search = SearchPipeline::new(
            counting_search(Arc::clone(&calls), queries),
            Duration::from_millis(100),
            3,
        );

        search.on_query_changed("denreyes".to_string());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        search.on_query_changed("de".to_string());
        assert_eq!(search.state().get(), ViewState::default());
        assert_eq!(search.input().get(), "de");
    }
}
