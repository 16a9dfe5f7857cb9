//! Runs fetches for a [`CategoryController`] on the tokio runtime.
//!
//! Each selection spawns its fetch as a background task; results come back
//! over a channel tagged with their [`Ticket`], so a slow response for an
//! abandoned category can never overwrite a newer one.

use crate::api::{FetchOutcome, NewsClient};
use crate::controller::{CategoryController, PendingFetch, Surface, Ticket};
use tokio::sync::mpsc;
use tracing::debug;

const OUTCOME_BUFFER: usize = 8;

/// A controller plus the machinery to run its fetches concurrently.
#[derive(Debug)]
pub struct Session<S> {
    controller: CategoryController<S>,
    client: NewsClient,
    tx: mpsc::Sender<(Ticket, FetchOutcome)>,
    rx: mpsc::Receiver<(Ticket, FetchOutcome)>,
    in_flight: usize,
}

impl<S: Surface> Session<S> {
    pub fn new(controller: CategoryController<S>, client: NewsClient) -> Self {
        let (tx, rx) = mpsc::channel(OUTCOME_BUFFER);
        Self {
            controller,
            client,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Kick off the initial fetch, if the controller allows one.
    pub fn start(&mut self) -> bool {
        match self.controller.start() {
            Some(pending) => {
                self.spawn(pending);
                true
            }
            None => false,
        }
    }

    /// Forward a user's category choice; returns whether a fetch started.
    pub fn select(&mut self, raw: &str) -> bool {
        match self.controller.select_category(raw) {
            Some(pending) => {
                self.spawn(pending);
                true
            }
            None => false,
        }
    }

    fn spawn(&mut self, pending: PendingFetch) {
        let PendingFetch { ticket, request } = pending;
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!(category = %ticket.category, in_flight = self.in_flight, "Spawning fetch");

        tokio::spawn(async move {
            let outcome = client.fetch_headlines(&request).await;
            if tx.send((ticket, outcome)).await.is_err() {
                debug!(category = %ticket.category, "Session closed before outcome delivery");
            }
        });
    }

    /// Number of fetches spawned but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Wait for the next fetch to resolve and apply it.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the outcome
    /// was displayed (`false` means it was stale). Cancel-safe.
    pub async fn next_outcome(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let (ticket, outcome) = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.controller.apply(ticket, outcome))
    }

    /// Apply outcomes until no fetch is left in flight.
    pub async fn settle(&mut self) {
        while self.next_outcome().await.is_some() {}
    }

    pub fn controller(&self) -> &CategoryController<S> {
        &self.controller
    }

    pub fn into_controller(self) -> CategoryController<S> {
        self.controller
    }
}
