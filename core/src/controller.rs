//! Render-state controller: one request lifecycle per view.
//!
//! # Design
//! Each view owns a `RequestState` (`Idle → Loading → Settled`, none
//! terminal) and drives the loading indicator and submitting control from it
//! instead of re-deriving "is it loading" from the container.
//!
//! Views run on a single thread and may be re-entered while a request is
//! suspended. Under the default `Supersession::LastSettled` requests are not
//! tagged: whichever settles last is rendered, and the first settle clears the
//! shared loading indicator even if another request on the view is still in
//! flight. `Supersession::LatestIssued` tags each request with a generation
//! and drops outcomes that are no longer the newest.

use std::cell::Cell;

use crate::client::LaunchClient;
use crate::container::{Container, Control};
use crate::render::{self, markers};
use crate::source::RemoteSource;
use crate::types::{FetchOutcome, SearchQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Settled,
}

/// What a view does with an outcome that settles after a newer request was
/// issued on the same view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Supersession {
    /// Render every outcome as it settles; the last to settle wins.
    #[default]
    LastSettled,
    /// Render only the outcome of the most recently issued request.
    LatestIssued,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewConfig {
    pub supersession: Supersession,
}

/// What a view put into its container when a request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Results(usize),
    NoResults,
    Error,
    Detail,
    Missing,
    /// The outcome was superseded and nothing was rendered.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

#[derive(Debug, Default)]
struct Lifecycle {
    state: Cell<RequestState>,
    issued: Cell<u64>,
    /// Address of the control held by the newest request, if it passed one.
    latest_control: Cell<Option<*const ()>>,
    config: ViewConfig,
}

fn control_addr(control: &dyn Control) -> *const () {
    control as *const _ as *const ()
}

impl Lifecycle {
    fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn begin(&self, container: &impl Container, control: Option<&dyn Control>) -> Ticket {
        let ticket = Ticket(self.issued.get() + 1);
        self.issued.set(ticket.0);
        self.latest_control.set(control.map(control_addr));
        self.enter_loading(container, control);
        ticket
    }

    /// Idempotent while already loading.
    fn enter_loading(&self, container: &impl Container, control: Option<&dyn Control>) {
        if self.state.get() != RequestState::Loading {
            container.append(render::loading_indicator());
            self.state.set(RequestState::Loading);
        }
        if let Some(control) = control {
            control.set_enabled(false);
        }
    }

    /// Leaves `Loading`. Returns `false` when the outcome for `ticket` must be
    /// dropped. A dropped request leaves the indicator and state alone but
    /// re-enables its control unless the newest in-flight request holds it.
    fn settle(&self, ticket: Ticket, container: &impl Container, control: Option<&dyn Control>) -> bool {
        if self.config.supersession == Supersession::LatestIssued && ticket.0 != self.issued.get() {
            tracing::debug!(ticket = ticket.0, latest = self.issued.get(), "discarding superseded outcome");
            if let Some(control) = control {
                let held_by_newest = self.state.get() == RequestState::Loading
                    && self.latest_control.get() == Some(control_addr(control));
                if !held_by_newest {
                    control.set_enabled(true);
                }
            }
            return false;
        }
        container.remove(markers::LOADING);
        if let Some(control) = control {
            control.set_enabled(true);
        }
        self.state.set(RequestState::Settled);
        true
    }
}

fn clear(container: &impl Container, marker: &str) {
    if container.contains(marker) {
        container.remove(marker);
    }
}

/// The search screen: a query goes in, one result block comes out.
pub struct SearchView<S, C> {
    client: LaunchClient<S>,
    container: C,
    lifecycle: Lifecycle,
}

impl<S: RemoteSource, C: Container> SearchView<S, C> {
    pub fn new(client: LaunchClient<S>, container: C) -> Self {
        Self::with_config(client, container, ViewConfig::default())
    }

    pub fn with_config(client: LaunchClient<S>, container: C, config: ViewConfig) -> Self {
        Self {
            client,
            container,
            lifecycle: Lifecycle::new(config),
        }
    }

    pub fn state(&self) -> RequestState {
        self.lifecycle.state.get()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn client(&self) -> &LaunchClient<S> {
        &self.client
    }

    /// Tears down the previous result block, fetches, and renders exactly one
    /// new block. `control` is disabled for the duration of the request.
    pub async fn search_and_render(&self, control: Option<&dyn Control>, query: &SearchQuery) -> Rendered {
        clear(&self.container, markers::RESULTS);
        let ticket = self.lifecycle.begin(&self.container, control);
        tracing::debug!(view = "search", query = %query, ticket = ticket.0, "loading");

        let outcome = self.client.search_launches(query).await;

        if !self.lifecycle.settle(ticket, &self.container, control) {
            return Rendered::Discarded;
        }
        let rendered = match &outcome {
            FetchOutcome::Ok(launches) if launches.is_empty() => Rendered::NoResults,
            FetchOutcome::Ok(launches) => Rendered::Results(launches.len()),
            FetchOutcome::Failed => Rendered::Error,
        };
        tracing::debug!(view = "search", query = %query, ?rendered, "settled");

        // An overlapping request may have rendered since this one started.
        clear(&self.container, markers::RESULTS);
        self.container.append(render::search_results(&outcome, query));
        rendered
    }
}

/// The single-launch screen.
pub struct DetailView<S, C> {
    client: LaunchClient<S>,
    container: C,
    lifecycle: Lifecycle,
}

impl<S: RemoteSource, C: Container> DetailView<S, C> {
    pub fn new(client: LaunchClient<S>, container: C) -> Self {
        Self::with_config(client, container, ViewConfig::default())
    }

    pub fn with_config(client: LaunchClient<S>, container: C, config: ViewConfig) -> Self {
        Self {
            client,
            container,
            lifecycle: Lifecycle::new(config),
        }
    }

    pub fn state(&self) -> RequestState {
        self.lifecycle.state.get()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub async fn show(&self, id: &str) -> Rendered {
        clear(&self.container, markers::DETAIL);
        let ticket = self.lifecycle.begin(&self.container, None);
        tracing::debug!(view = "detail", id, ticket = ticket.0, "loading");

        let outcome = self.client.get_launch(id).await;

        if !self.lifecycle.settle(ticket, &self.container, None) {
            return Rendered::Discarded;
        }
        let rendered = if outcome.is_ok() {
            Rendered::Detail
        } else {
            Rendered::Missing
        };
        tracing::debug!(view = "detail", id, ?rendered, "settled");

        clear(&self.container, markers::DETAIL);
        self.container.append(render::launch_detail(&outcome, id));
        rendered
    }
}
