//! # Application Orchestrator
//!
//! The [`App`] struct is the command surface of the client. A rendering layer
//! (the CLI in `main.rs`, or any UI) calls its methods, reads
//! [`SessionSnapshot`]s, and listens for [`AppEvent`]s.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Rendering surface (CLI / UI)                │
//! │   app.login(..)  app.submit_card(..)  app.snapshot()        │
//! └───────────────┬──────────────────────────────▲──────────────┘
//!                 │ commands                     │ AppEvent
//! ┌───────────────▼──────────────────────────────┴──────────────┐
//! │  App                                                        │
//! │  ┌────────────────────────┐   ┌──────────────────────────┐  │
//! │  │  SessionController     │   │  ViewSync                │  │
//! │  │  login / logout /      │   │  mutate → summary → list │  │
//! │  │  bootstrap             │   │  (one async gate)        │  │
//! │  └───────────┬────────────┘   └────────────┬─────────────┘  │
//! │              └──────────────┬──────────────┘                │
//! │                      ┌──────▼──────┐      ┌──────────────┐  │
//! │                      │  ApiClient  │─────▶│ Arc<Session> │  │
//! │                      └─────────────┘ 401  └──────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - **[`App`]**: Command facade
//! - **[`Session`](session::Session)**: The only shared mutable state
//! - **[`AppEvent`]**: Notifications for the rendering surface (see [`events`])
//! - **[`handlers`]**: Session controller and view synchronization
//!
//! ## Event-Driven Communication
//!
//! ```rust,ignore
//! let events = app.events();
//! while let Ok(event) = events.try_recv() {
//!     match event {
//!         AppEvent::PromptLogin(prompt) => show_login(prompt),
//!         AppEvent::ViewUpdated => render(app.snapshot()),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use expense_client::app::App;
//! use expense_client::config::ClientConfig;
//!
//! # async fn run() -> expense_client::core::error::Result<()> {
//! let app = App::new(&ClientConfig::from_env())?;
//! app.login("ana", "secret").await?;
//! app.save_balance("2500,00").await?;
//! println!("{:?}", app.snapshot().view.summary);
//! app.logout().await;
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod handlers;
pub mod session;
pub mod state;

use std::sync::Arc;

use async_channel::Receiver;
use shared::{Balance, ExpenseCard, UserInfo};

pub use events::AppEvent;
pub use handlers::{SessionController, ViewSync};
pub use session::Session;
pub use state::{AuthMode, AuthPrompt, SessionSnapshot, SessionStatus, ViewCache};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::HttpBackend;
use crate::services::api::{cards, export, ApiClient, CardDraft, CardFilters};
use crate::utils::constants::CONNECTION_FAILED;

/// Command facade over one session.
pub struct App {
    session: Arc<Session>,
    api: Arc<ApiClient>,
    controller: SessionController,
    sync: ViewSync,
    events: Receiver<AppEvent>,
}

impl App {
    /// App over the real network
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let (tx, rx) = async_channel::unbounded();
        let session = Arc::new(Session::new(tx));
        let api = Arc::new(ApiClient::new(config, session.clone())?);
        Ok(Self::assemble(session, api, rx))
    }

    /// App over any backend; `base_url` includes the API prefix
    pub fn with_backend(backend: Arc<dyn HttpBackend>, base_url: impl Into<String>) -> Self {
        let (tx, rx) = async_channel::unbounded();
        let session = Arc::new(Session::new(tx));
        let api = Arc::new(ApiClient::with_backend(backend, base_url, session.clone()));
        Self::assemble(session, api, rx)
    }

    fn assemble(session: Arc<Session>, api: Arc<ApiClient>, events: Receiver<AppEvent>) -> Self {
        Self {
            controller: SessionController::new(api.clone()),
            sync: ViewSync::new(api.clone()),
            session,
            api,
            events,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// A receiver for session notifications. Receivers share one queue.
    pub fn events(&self) -> Receiver<AppEvent> {
        self.events.clone()
    }

    /// Take every notification queued so far
    pub fn drain_events(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }

    pub fn filters(&self) -> CardFilters {
        self.sync.filters()
    }

    // ----- Session commands -----

    /// Resume the server session if there is one, then load the dashboard.
    ///
    /// A dashboard failure here leaves the "could not connect" state set by
    /// the load and publishes [`CONNECTION_FAILED`] instead of failing the start.
    pub async fn start(&self) -> Result<Option<UserInfo>> {
        let user = self.controller.bootstrap().await?;
        if user.is_some() {
            if let Err(e) = self.sync.load_dashboard().await {
                if !e.is_unauthorized() {
                    self.session.notify_error(CONNECTION_FAILED);
                }
            }
        }
        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo> {
        let user = self.controller.login(username, password).await?;
        self.load_after_sign_in().await;
        Ok(user)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<UserInfo> {
        let user = self.controller.register(username, password).await?;
        self.load_after_sign_in().await;
        Ok(user)
    }

    async fn load_after_sign_in(&self) {
        if let Err(e) = self.sync.load_dashboard().await {
            if !e.is_unauthorized() {
                self.session.notify_error(e.message());
            }
        }
    }

    pub async fn logout(&self) {
        self.controller.logout().await;
    }

    pub fn switch_auth_mode(&self, mode: AuthMode) {
        self.controller.switch_mode(mode);
    }

    // ----- Data commands -----

    pub async fn save_balance(&self, raw: &str) -> Result<Balance> {
        self.controller.require_session()?;
        self.sync.save_balance(raw).await
    }

    /// Create a card, or update card `id` when given
    pub async fn submit_card(&self, id: Option<i64>, draft: &CardDraft) -> Result<ExpenseCard> {
        self.controller.require_session()?;
        let api = self.api.clone();
        let draft = draft.clone();
        self.sync
            .mutate(|| async move {
                match id {
                    Some(id) => cards::update_card(&api, id, &draft).await,
                    None => cards::create_card(&api, &draft).await,
                }
            })
            .await
    }

    pub async fn delete_card(&self, id: i64) -> Result<()> {
        self.controller.require_session()?;
        let api = self.api.clone();
        self.sync
            .mutate(|| async move { cards::delete_card(&api, id).await })
            .await
    }

    /// Fetch one card, e.g. to prefill an edit form
    pub async fn load_card(&self, id: i64) -> Result<ExpenseCard> {
        self.controller.require_session()?;
        cards::get_card(&self.api, id).await
    }

    /// Change the list filters; only the list is fetched again
    pub async fn set_filters(&self, filters: CardFilters) -> Result<Vec<ExpenseCard>> {
        self.controller.require_session()?;
        self.sync.set_filters(filters).await
    }

    /// Reload balance, summary and list
    pub async fn refresh(&self) -> Result<()> {
        self.controller.require_session()?;
        self.sync.load_dashboard().await
    }

    pub async fn export_spreadsheet(&self) -> Result<Vec<u8>> {
        self.controller.require_session()?;
        export::export_spreadsheet(&self.api).await
    }
}
