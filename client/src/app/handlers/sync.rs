//! # View Synchronization
//!
//! Keeps the cached view in line with the server. Derived values (summary,
//! percentages, zone) are never patched locally: after every write the
//! summary and then the current card list are fetched again, and the cache
//! is replaced only once both arrived.
//!
//! A single async gate covers "mutate, fetch summary, fetch list", so a
//! second mutation waits until the first one's refresh has landed.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Balance, ExpenseCard};
use tokio::sync::Mutex;

use crate::app::session::Session;
use crate::core::error::{ClientError, Result};
use crate::services::api::{balance, cards, ApiClient, CardFilters};

pub struct ViewSync {
    api: Arc<ApiClient>,
    gate: Mutex<()>,
    filters: RwLock<CardFilters>,
}

impl ViewSync {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            gate: Mutex::new(()),
            filters: RwLock::new(CardFilters::default()),
        }
    }

    fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub fn filters(&self) -> CardFilters {
        self.filters.read().clone()
    }

    /// Run a write, then refresh summary and list.
    ///
    /// The write's own result is returned. A failed refresh does not turn a
    /// successful write into an error; it is published as
    /// [`AppEvent::Error`](crate::app::events::AppEvent::Error) instead.
    pub async fn mutate<T, F, Fut>(&self, write: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _gate = self.gate.lock().await;
        let epoch = self.session().epoch();

        let value = write().await?;

        if !self.session().invalidate_derived(epoch) {
            return Ok(value);
        }
        if let Err(e) = self.refresh(epoch).await {
            tracing::warn!(error = %e, "Refresh after mutation failed");
        }
        Ok(value)
    }

    /// Write the balance, keep the confirmed value and refresh
    pub async fn save_balance(&self, raw: &str) -> Result<Balance> {
        let api = self.api.clone();
        let raw = raw.to_string();
        let session = self.session().clone();
        self.mutate(|| async move {
            let epoch = session.epoch();
            let saved = balance::put_balance(&api, &raw).await?;
            session.apply_balance(epoch, saved);
            Ok(saved)
        })
        .await
    }

    /// Re-fetch summary then list on their own, outside any write
    pub async fn after_mutation(&self) -> Result<()> {
        let _gate = self.gate.lock().await;
        let epoch = self.session().epoch();
        self.refresh(epoch).await
    }

    /// Replace the filters and reload the list only
    pub async fn set_filters(&self, filters: CardFilters) -> Result<Vec<ExpenseCard>> {
        *self.filters.write() = filters;
        self.reload_cards().await
    }

    pub async fn reload_cards(&self) -> Result<Vec<ExpenseCard>> {
        let _gate = self.gate.lock().await;
        let epoch = self.session().epoch();
        match cards::list_cards(&self.api, &self.filters()).await {
            Ok(list) => {
                self.session().apply_cards(epoch, list.clone());
                Ok(list)
            }
            Err(e) => {
                self.surface(&e);
                Err(e)
            }
        }
    }

    /// Balance, summary and list, one after the other.
    ///
    /// A failure other than 401 marks the view as unreachable, if the session
    /// is still the one the load started under. Errors are returned, not
    /// published: what they mean depends on whether this is the startup load
    /// or a reload after login.
    pub async fn load_dashboard(&self) -> Result<()> {
        let _gate = self.gate.lock().await;
        let epoch = self.session().epoch();

        let result = async {
            let balance = balance::get_balance(&self.api).await?;
            let summary = cards::get_summary(&self.api).await?;
            let list = cards::list_cards(&self.api, &self.filters()).await?;
            Ok::<_, ClientError>((balance, summary, list))
        }
        .await;

        match result {
            Ok((balance, summary, list)) => {
                self.session().apply_dashboard(epoch, balance, summary, list);
                tracing::debug!(epoch, "Dashboard loaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard load failed");
                if !e.is_unauthorized() {
                    self.session().set_connection_error(epoch, true);
                }
                Err(e)
            }
        }
    }

    /// Summary, then list; applied together or not at all. Caller holds the gate.
    async fn refresh(&self, epoch: u64) -> Result<()> {
        let result = async {
            let summary = cards::get_summary(&self.api).await?;
            let list = cards::list_cards(&self.api, &self.filters()).await?;
            Ok::<_, ClientError>((summary, list))
        }
        .await;

        match result {
            Ok((summary, list)) => {
                self.session().apply_refresh(epoch, summary, list);
                Ok(())
            }
            Err(e) => {
                self.surface(&e);
                Err(e)
            }
        }
    }

    /// A 401 already opened the prompt; anything else becomes an error event
    fn surface(&self, error: &ClientError) {
        if !error.is_unauthorized() {
            self.session().notify_error(error.message());
        }
    }
}
