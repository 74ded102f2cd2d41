//! Cancel-and-replace timer for search-as-you-type.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    suggest::{is_suggest_query, suggest, Suggestion, SUGGEST_DEBOUNCE},
    vehicle::Car,
};

/// Runs at most one delayed task; scheduling a new one aborts the pending
/// one, and dropping the debouncer discards it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called inside a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Latest suggestion set and the query it was computed for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestUpdate {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Debounced suggest computation publishing through a `watch` channel.
#[derive(Debug)]
pub struct SuggestSession {
    cars: Arc<Vec<Car>>,
    debouncer: Debouncer,
    updates: Arc<watch::Sender<SuggestUpdate>>,
}

impl SuggestSession {
    pub fn new(cars: Arc<Vec<Car>>) -> Self {
        Self::with_delay(cars, SUGGEST_DEBOUNCE)
    }

    pub fn with_delay(cars: Arc<Vec<Car>>, delay: Duration) -> Self {
        let (updates, _) = watch::channel(SuggestUpdate::default());
        Self {
            cars,
            debouncer: Debouncer::new(delay),
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestUpdate> {
        self.updates.subscribe()
    }

    /// A keystroke. Short queries clear the suggestions at once; longer
    /// ones are computed after the debounce delay unless replaced first.
    pub fn on_query(&mut self, query: &str) {
        let query = query.to_string();
        if !is_suggest_query(&query) {
            self.debouncer.cancel();
            self.updates.send_replace(SuggestUpdate {
                query,
                suggestions: Vec::new(),
            });
            return;
        }

        let cars = Arc::clone(&self.cars);
        let updates = Arc::clone(&self.updates);
        self.debouncer.schedule(async move {
            let suggestions = suggest(&cars, &query);
            tracing::debug!("computed {} suggestions for `{}`", suggestions.len(), query);
            updates.send_replace(SuggestUpdate {
                query,
                suggestions,
            });
        });
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
