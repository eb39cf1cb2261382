//! Fetch-and-display controller.
//!
//! Holds one [`ViewState`] for the presentation layer and re-runs the
//! fetch → validate → partition cycle whenever the source identifier changes.
//! Every fetch carries a [`FetchTicket`]; a completion whose ticket is not the
//! most recently issued one is discarded, so a slow response for an old
//! identifier can never overwrite the state produced for a newer one.

use crate::core::roster::partition_cats;
use crate::core::schema::validate;
use crate::domain::model::CatRoster;
use crate::domain::ports::PeopleSource;
use crate::utils::error::{CatRosterError, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

pub const LOADING_MESSAGE: &str = "Waiting for response...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Error { message: String },
    Ready { roster: CatRoster },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn roster(&self) -> Option<&CatRoster> {
        match self {
            ViewState::Ready { roster } => Some(roster),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Identifies one issued fetch. Only the latest ticket may update state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    source: String,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Default)]
struct Tracking {
    source: Option<String>,
    generation: u64,
}

pub struct CatListsController<S: PeopleSource> {
    people: Arc<S>,
    tracking: Arc<Mutex<Tracking>>,
    state: Arc<watch::Sender<ViewState>>,
}

impl<S: PeopleSource> Clone for CatListsController<S> {
    fn clone(&self) -> Self {
        Self {
            people: Arc::clone(&self.people),
            tracking: Arc::clone(&self.tracking),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: PeopleSource> CatListsController<S> {
    pub fn new(people: S) -> Self {
        Self::from_arc(Arc::new(people))
    }

    pub fn from_arc(people: Arc<S>) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            people,
            tracking: Arc::new(Mutex::new(Tracking::default())),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn current_source(&self) -> Option<String> {
        self.lock_tracking().source.clone()
    }

    /// Records `source` as the identifier to display.
    ///
    /// Returns a ticket for a new fetch when the identifier differs from the
    /// previous one, `None` when it is unchanged.
    pub fn set_source(&self, source: &str) -> Option<FetchTicket> {
        let mut tracking = self.lock_tracking();
        if tracking.source.as_deref() == Some(source) {
            tracing::debug!("Source unchanged, not refetching: {}", source);
            return None;
        }
        tracking.source = Some(source.to_string());
        Some(self.issue(&mut tracking, source))
    }

    /// Issues a fresh ticket for the current identifier, if any.
    pub fn refresh(&self) -> Option<FetchTicket> {
        let mut tracking = self.lock_tracking();
        let source = tracking.source.clone()?;
        Some(self.issue(&mut tracking, &source))
    }

    fn issue(&self, tracking: &mut Tracking, source: &str) -> FetchTicket {
        tracking.generation += 1;
        self.state.send_replace(ViewState::Loading);
        tracing::debug!("Issued fetch #{} for {}", tracking.generation, source);
        FetchTicket {
            generation: tracking.generation,
            source: source.to_string(),
        }
    }

    /// Applies a fetch outcome. Returns `false` when the ticket is stale and
    /// the outcome was discarded.
    pub fn complete(&self, ticket: &FetchTicket, outcome: Result<serde_json::Value>) -> bool {
        let next = match outcome {
            Ok(raw) => match validate(&raw) {
                Ok(people) => ViewState::Ready {
                    roster: partition_cats(&people),
                },
                Err(e) => ViewState::Error {
                    message: CatRosterError::from(e).to_string(),
                },
            },
            Err(e) => ViewState::Error {
                message: e.to_string(),
            },
        };

        let tracking = self.lock_tracking();
        if ticket.generation != tracking.generation {
            tracing::warn!(
                "Discarding stale response #{} for {} (latest is #{})",
                ticket.generation,
                ticket.source,
                tracking.generation
            );
            return false;
        }

        match &next {
            ViewState::Ready { roster } => tracing::info!(
                "Loaded {} cats from {}",
                roster.total(),
                ticket.source
            ),
            ViewState::Error { message } => {
                tracing::error!("Fetch from {} failed: {}", ticket.source, message)
            }
            ViewState::Loading => {}
        }
        self.state.send_replace(next);
        true
    }

    /// Runs the fetch for `ticket` and applies its outcome.
    pub async fn execute(&self, ticket: FetchTicket) -> bool {
        tracing::debug!("Fetching people from: {}", ticket.source);
        let outcome = self.people.fetch(&ticket.source).await;
        self.complete(&ticket, outcome)
    }

    /// Points the controller at `source` and, if that changed anything,
    /// fetches it. Returns whether this call produced the displayed state.
    pub async fn load(&self, source: &str) -> bool {
        match self.set_source(source) {
            Some(ticket) => self.execute(ticket).await,
            None => false,
        }
    }

    pub async fn reload(&self) -> bool {
        match self.refresh() {
            Some(ticket) => self.execute(ticket).await,
            None => false,
        }
    }

    /// Follows `sources`, spawning a fetch each time the identifier changes.
    /// Returns once the sending side is dropped; in-flight fetches keep running.
    pub async fn drive(&self, mut sources: watch::Receiver<String>)
    where
        S: 'static,
    {
        loop {
            let source = sources.borrow_and_update().clone();
            if let Some(ticket) = self.set_source(&source) {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.execute(ticket).await;
                });
            }

            if sources.changed().await.is_err() {
                tracing::debug!("Source channel closed, controller stops following");
                break;
            }
        }
    }

    fn lock_tracking(&self) -> MutexGuard<'_, Tracking> {
        // Tracking is plain data, a poisoned lock still holds a usable value.
        self.tracking
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
