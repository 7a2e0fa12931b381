//! State behind the status line and the response box.
//!
//! Every activation gets a fresh [`RequestId`]. Only the outcome of the most
//! recently issued request is allowed to touch the displays; outcomes of
//! superseded requests are dropped.

use std::fmt::{self, Display};

use crate::config::StatusMessages;
use crate::http::error::RequestFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    #[cfg(test)]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Whether a settlement was written to the displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
pub struct Panel {
    messages: StatusMessages,
    status: String,
    response: Option<String>,
    phase: Phase,
    issued: u64,
}

impl Panel {
    pub fn new(messages: StatusMessages) -> Self {
        Self {
            messages,
            status: String::new(),
            response: None,
            phase: Phase::Idle,
            issued: 0,
        }
    }

    /// The window is up: announce readiness.
    pub fn on_ready(&mut self) {
        self.status = self.messages.ready.clone();
        self.phase = Phase::Idle;
    }

    /// The button was pressed. The loading status is set before the caller
    /// issues the request under the returned id.
    pub fn on_activate(&mut self) -> RequestId {
        self.issued += 1;
        self.status = self.messages.loading.clone();
        self.phase = Phase::Loading;
        RequestId(self.issued)
    }

    pub fn on_settled(&mut self, id: RequestId, outcome: Result<String, RequestFailure>) -> Settlement {
        if !self.is_latest(id) {
            return Settlement::Stale;
        }

        match outcome {
            Ok(body) => {
                self.response = Some(body);
                self.status = self.messages.success.clone();
                self.phase = Phase::Success;
            }
            Err(failure) => {
                self.response = Some(failure.message().to_string());
                self.status = self.messages.failure.clone();
                self.phase = Phase::Failure;
            }
        }

        Settlement::Applied
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.issued
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Preset};

    fn ready_panel() -> Panel {
        let mut panel = Panel::new(AppConfig::from_preset(Preset::ApiTest).messages);
        panel.on_ready();
        panel
    }

    #[test]
    fn ready_sets_status_and_leaves_response_unset() {
        let panel = ready_panel();
        assert_eq!(panel.status(), "🔍 Ready to send a request.");
        assert_eq!(panel.response(), None);
        assert_eq!(panel.phase(), Phase::Idle);
    }

    #[test]
    fn activation_shows_loading_immediately() {
        let mut panel = ready_panel();
        panel.on_activate();
        assert_eq!(panel.status(), "⏳ Sending request...");
        assert_eq!(panel.phase(), Phase::Loading);
        assert_eq!(panel.response(), None);
    }

    #[test]
    fn success_renders_body_and_success_status() {
        let mut panel = ready_panel();
        let id = panel.on_activate();

        assert_eq!(panel.on_settled(id, Ok("hello".to_string())), Settlement::Applied);
        assert_eq!(panel.response(), Some("hello"));
        assert_eq!(panel.status(), "✅ HTTPS Request successful!");
        assert_eq!(panel.phase(), Phase::Success);
    }

    #[test]
    fn failure_renders_message_and_failure_status() {
        let mut panel = ready_panel();
        let id = panel.on_activate();

        panel.on_settled(id, Err(RequestFailure::new("Failed to fetch")));
        assert_eq!(panel.response(), Some("Failed to fetch"));
        assert_eq!(panel.status(), "❌ Error connecting to HTTPS server.");
        assert_eq!(panel.phase(), Phase::Failure);
    }

    #[test]
    fn sequential_activations_are_independent() {
        let mut panel = ready_panel();

        let first = panel.on_activate();
        panel.on_settled(first, Err(RequestFailure::new("Failed to fetch")));
        assert_eq!(panel.phase(), Phase::Failure);

        let second = panel.on_activate();
        assert_ne!(first, second);
        assert_eq!(panel.status(), "⏳ Sending request...");
        panel.on_settled(second, Ok("Internal Error".to_string()));
        assert_eq!(panel.response(), Some("Internal Error"));
        assert_eq!(panel.status(), "✅ HTTPS Request successful!");

        let third = panel.on_activate();
        panel.on_settled(third, Ok("hello".to_string()));
        assert_eq!(panel.response(), Some("hello"));
        assert_eq!(panel.phase(), Phase::Success);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut panel = ready_panel();
        let older = panel.on_activate();
        let newer = panel.on_activate();

        assert_eq!(panel.on_settled(newer, Ok("new".to_string())), Settlement::Applied);
        assert_eq!(
            panel.on_settled(older, Err(RequestFailure::new("late failure"))),
            Settlement::Stale
        );
        assert_eq!(panel.response(), Some("new"));
        assert_eq!(panel.phase(), Phase::Success);
    }

    #[test]
    fn stale_outcome_does_not_end_loading() {
        let mut panel = ready_panel();
        let older = panel.on_activate();
        let _newer = panel.on_activate();

        assert_eq!(panel.on_settled(older, Ok("old".to_string())), Settlement::Stale);
        assert_eq!(panel.phase(), Phase::Loading);
        assert_eq!(panel.response(), None);
    }

    #[test]
    fn request_ids_increase() {
        let mut panel = ready_panel();
        let a = panel.on_activate();
        let b = panel.on_activate();
        assert!(b > a);
        assert_eq!(b.to_string(), "#2");
    }
}
