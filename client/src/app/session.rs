//! # Session
//!
//! The one piece of shared mutable state in the client: who is signed in,
//! whether the authentication prompt is open, and the server data cached for
//! the current session.
//!
//! Reads are free-form snapshots. Writes only happen through the transition
//! methods below, which also publish [`AppEvent`]s. Every transition bumps the
//! session epoch; results fetched under an older epoch are dropped instead of
//! applied, so a sign-out can never be undone by a late response.

use async_channel::Sender;
use parking_lot::RwLock;
use shared::{Balance, ExpenseCard, Summary, UserInfo};

use crate::app::events::AppEvent;
use crate::app::state::{AuthMode, AuthPrompt, SessionSnapshot, SessionStatus, ViewCache};

#[derive(Debug, Default)]
struct SessionState {
    status: SessionStatus,
    user: Option<UserInfo>,
    prompt: Option<AuthPrompt>,
    epoch: u64,
    view: ViewCache,
}

impl SessionState {
    fn bump(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }
}

pub struct Session {
    state: RwLock<SessionState>,
    events: Sender<AppEvent>,
}

impl Session {
    /// New anonymous session publishing to `events`
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            events,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.read().user.clone()
    }

    pub fn prompt(&self) -> Option<AuthPrompt> {
        self.state.read().prompt.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.state.read().epoch
    }

    /// Whether a result fetched under `epoch` may still be applied
    pub fn is_current(&self, epoch: u64) -> bool {
        self.state.read().epoch == epoch
    }

    pub fn view(&self) -> ViewCache {
        self.state.read().view.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            status: state.status,
            user: state.user.clone(),
            prompt: state.prompt.clone(),
            epoch: state.epoch,
            view: state.view.clone(),
        }
    }

    // ----- Authentication transitions -----

    pub(crate) fn begin_authentication(&self) -> u64 {
        let epoch = {
            let mut state = self.state.write();
            state.status = SessionStatus::Authenticating;
            state.bump()
        };
        self.emit(AppEvent::SessionChanged {
            status: SessionStatus::Authenticating,
            user: None,
        });
        epoch
    }

    /// Sign `user` in, close the prompt and start from an empty view.
    ///
    /// `epoch` is the one returned by [`Session::begin_authentication`] (or
    /// read before the request). Returns the new epoch, or `None` when the
    /// session moved on while the request was in flight.
    pub(crate) fn authenticate(&self, epoch: u64, user: UserInfo) -> Option<u64> {
        let (epoch, had_prompt) = {
            let mut state = self.state.write();
            if !Self::still_current(&state, epoch) {
                return None;
            }
            state.status = SessionStatus::Authenticated;
            state.user = Some(user.clone());
            state.view = ViewCache::default();
            let had_prompt = state.prompt.take().is_some();
            (state.bump(), had_prompt)
        };

        tracing::info!(user_id = user.id, username = %user.username, epoch, "Session authenticated");
        self.emit(AppEvent::SessionChanged {
            status: SessionStatus::Authenticated,
            user: Some(user),
        });
        if had_prompt {
            self.emit(AppEvent::PromptClosed);
        }
        Some(epoch)
    }

    /// Failed login or register: back to anonymous with the error on the
    /// prompt. Ignored when `epoch` is stale.
    pub(crate) fn reject_authentication(&self, epoch: u64, mode: AuthMode, message: String) -> bool {
        let prompt = AuthPrompt {
            mode,
            message: Some(message),
        };
        {
            let mut state = self.state.write();
            if !Self::still_current(&state, epoch) {
                return false;
            }
            state.status = SessionStatus::Anonymous;
            state.user = None;
            state.prompt = Some(prompt.clone());
            state.bump();
        }
        self.emit(AppEvent::SessionChanged {
            status: SessionStatus::Anonymous,
            user: None,
        });
        self.emit(AppEvent::PromptLogin(prompt));
        true
    }

    /// Drop identity and cached data, then open the login prompt with `message`.
    ///
    /// Events are only published for what actually changed, so repeated calls
    /// with the same message notify once. Returns whether the prompt
    /// notification was sent.
    pub(crate) fn force_sign_out(&self, message: Option<&str>) -> bool {
        self.sign_out(None, message)
    }

    /// Sign-out caused by a response to a request sent under `epoch`.
    /// A late answer from an earlier session leaves the current one alone.
    pub(crate) fn expire(&self, epoch: u64, message: Option<&str>) -> bool {
        self.sign_out(Some(epoch), message)
    }

    fn sign_out(&self, expected_epoch: Option<u64>, message: Option<&str>) -> bool {
        let prompt = AuthPrompt::login(message.map(str::to_string));
        let (status_changed, prompt_changed) = {
            let mut state = self.state.write();
            if let Some(expected) = expected_epoch {
                if !Self::still_current(&state, expected) {
                    return false;
                }
            }
            let status_changed = state.status != SessionStatus::Anonymous || state.user.is_some();
            let prompt_changed = state.prompt.as_ref() != Some(&prompt);

            state.status = SessionStatus::Anonymous;
            state.user = None;
            state.view = ViewCache::default();
            state.prompt = Some(prompt.clone());
            let epoch = state.bump();

            if status_changed {
                tracing::info!(epoch, reason = message.unwrap_or("none"), "Session signed out");
            }
            (status_changed, prompt_changed)
        };

        if status_changed {
            self.emit(AppEvent::SessionChanged {
                status: SessionStatus::Anonymous,
                user: None,
            });
        }
        if prompt_changed {
            self.emit(AppEvent::PromptLogin(prompt));
        }
        prompt_changed
    }

    /// Flip the prompt between login and register, clearing its message
    pub(crate) fn switch_prompt_mode(&self, mode: AuthMode) {
        self.show_prompt(AuthPrompt {
            mode,
            message: None,
        });
    }

    /// Open or update the prompt without touching status or cached data
    pub(crate) fn show_prompt(&self, prompt: AuthPrompt) {
        let changed = {
            let mut state = self.state.write();
            let changed = state.prompt.as_ref() != Some(&prompt);
            state.prompt = Some(prompt.clone());
            changed
        };
        if changed {
            self.emit(AppEvent::PromptLogin(prompt));
        }
    }

    // ----- View writes (epoch-guarded) -----

    pub(crate) fn apply_balance(&self, epoch: u64, balance: Balance) -> bool {
        self.update_view(epoch, |view| view.balance = Some(balance))
    }

    pub(crate) fn apply_cards(&self, epoch: u64, cards: Vec<ExpenseCard>) -> bool {
        self.update_view(epoch, |view| view.cards = Some(cards))
    }

    /// Replace summary and list together, after a mutation
    pub(crate) fn apply_refresh(&self, epoch: u64, summary: Summary, cards: Vec<ExpenseCard>) -> bool {
        self.update_view(epoch, |view| {
            view.summary = Some(summary);
            view.cards = Some(cards);
        })
    }

    pub(crate) fn apply_dashboard(
        &self,
        epoch: u64,
        balance: Balance,
        summary: Summary,
        cards: Vec<ExpenseCard>,
    ) -> bool {
        self.update_view(epoch, |view| {
            *view = ViewCache {
                balance: Some(balance),
                summary: Some(summary),
                cards: Some(cards),
                connection_error: false,
            };
        })
    }

    /// Forget derived data after a mutation, until the refetch lands
    pub(crate) fn invalidate_derived(&self, epoch: u64) -> bool {
        self.update_view(epoch, |view| {
            view.summary = None;
            view.cards = None;
        })
    }

    pub(crate) fn set_connection_error(&self, epoch: u64, failed: bool) -> bool {
        self.update_view(epoch, |view| view.connection_error = failed)
    }

    pub(crate) fn notify_error(&self, message: impl Into<String>) {
        self.emit(AppEvent::Error(message.into()));
    }

    fn update_view(&self, epoch: u64, apply: impl FnOnce(&mut ViewCache)) -> bool {
        {
            let mut state = self.state.write();
            if !Self::still_current(&state, epoch) {
                return false;
            }
            apply(&mut state.view);
        }
        self.emit(AppEvent::ViewUpdated);
        true
    }

    fn still_current(state: &SessionState, epoch: u64) -> bool {
        if state.epoch == epoch {
            return true;
        }
        tracing::debug!(
            result_epoch = epoch,
            current_epoch = state.epoch,
            "Discarding stale result"
        );
        false
    }

    fn emit(&self, event: AppEvent) {
        if let Err(e) = self.events.try_send(event) {
            tracing::debug!(error = %e, "No listener for session event");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Session")
            .field("status", &state.status)
            .field("user", &state.user)
            .field("epoch", &state.epoch)
            .finish()
    }
}
