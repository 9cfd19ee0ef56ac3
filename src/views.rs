//! Per-view state.
//!
//! Each screen owns its state explicitly: the cached records, the filter
//! criteria and where the last fetch stands. Fetches are identified by a
//! [`FetchTicket`]; a completion is applied only when its ticket is still the
//! current one, so responses that arrive late, out of order, or after the view
//! cancelled its fetch are dropped.

use std::future::Future;

use async_trait::async_trait;
use tracing::debug;

use crate::error::RequestResult;
use crate::filters::ListFilter;
use crate::resources::{Accessor, Resource};

/// Outcome of the most recent fetch of a view. Data and errors never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    fn from_result(result: RequestResult<T>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Identifies one fetch issued by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
struct Generation {
    current: u64,
    pending: bool,
}

impl Generation {
    fn issue(&mut self) -> FetchTicket {
        self.current += 1;
        self.pending = true;
        FetchTicket(self.current)
    }

    fn accept(&mut self, ticket: FetchTicket) -> bool {
        if !self.pending || ticket.0 != self.current {
            debug!(ticket = ticket.0, current = self.current, "Discarding stale fetch result");
            return false;
        }
        self.pending = false;
        true
    }

    fn cancel(&mut self) {
        self.pending = false;
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Something a list view can fetch its records from.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch(&self) -> RequestResult<Vec<T>>;
}

#[async_trait]
impl<'a, R: Resource> ListSource<R> for Accessor<'a, R> {
    async fn fetch(&self) -> RequestResult<Vec<R>> {
        self.get_all().await
    }
}

// ============================================================================
// ListView
// ============================================================================

/// State of a list screen: cached records plus display criteria `F`.
#[derive(Debug)]
pub struct ListView<T, F> {
    state: ViewState<Vec<T>>,
    criteria: F,
    generation: Generation,
}

impl<T: Clone, F: ListFilter<T> + Default> Default for ListView<T, F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<T: Clone, F: ListFilter<T>> ListView<T, F> {
    /// A view starts out loading.
    pub fn new(criteria: F) -> Self {
        Self {
            state: ViewState::Loading,
            criteria,
            generation: Generation::default(),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<T>> {
        &self.state
    }

    pub fn criteria(&self) -> &F {
        &self.criteria
    }

    /// Change the criteria; the visible subset is re-derived on the next read.
    pub fn set_criteria(&mut self, criteria: F) {
        self.criteria = criteria;
    }

    pub fn criteria_mut(&mut self) -> &mut F {
        &mut self.criteria
    }

    /// Records currently cached, unfiltered.
    pub fn records(&self) -> &[T] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records to display: the full filter pipeline over the cached list.
    pub fn visible(&self) -> Vec<T> {
        self.criteria.apply(self.records())
    }

    /// Start a fetch. Any earlier outstanding fetch becomes stale.
    ///
    /// Records already loaded stay visible while a refresh is in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation.issue()
    }

    /// Apply a fetch result if `ticket` is still current. Returns whether it was applied.
    pub fn complete(&mut self, ticket: FetchTicket, result: RequestResult<Vec<T>>) -> bool {
        if !self.generation.accept(ticket) {
            return false;
        }
        self.state = ViewState::from_result(result);
        true
    }

    /// Drop whatever fetch is outstanding; its result will be ignored.
    pub fn cancel(&mut self) {
        self.generation.cancel();
    }

    /// Fetch from `source` and apply the result.
    ///
    /// The view stays mutably borrowed until the fetch resolves, so nothing
    /// can `cancel` it meanwhile. A caller that needs to cancel or to overlap
    /// fetches takes a ticket with [`begin_fetch`](Self::begin_fetch), runs the
    /// request itself and hands the result to [`complete`](Self::complete).
    pub async fn refresh<S>(&mut self, source: &S) -> bool
    where
        S: ListSource<T> + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = source.fetch().await;
        self.complete(ticket, result)
    }
}

// ============================================================================
// DetailView
// ============================================================================

/// State of a single-record screen (dashboard, detail panels).
#[derive(Debug)]
pub struct DetailView<T> {
    state: ViewState<T>,
    generation: Generation,
}

impl<T> Default for DetailView<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            generation: Generation::default(),
        }
    }
}

impl<T> DetailView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation.issue()
    }

    pub fn complete(&mut self, ticket: FetchTicket, result: RequestResult<T>) -> bool {
        if !self.generation.accept(ticket) {
            return false;
        }
        self.state = ViewState::from_result(result);
        true
    }

    pub fn cancel(&mut self) {
        self.generation.cancel();
    }

    /// Await `fetch` and apply its result.
    ///
    /// Like [`ListView::refresh`], this holds the view for the whole fetch;
    /// use `begin_fetch` and `complete` directly when the fetch may be cancelled.
    pub async fn load<Fut>(&mut self, fetch: Fut) -> bool
    where
        Fut: Future<Output = RequestResult<T>>,
    {
        let ticket = self.begin_fetch();
        let result = fetch.await;
        self.complete(ticket, result)
    }
}
