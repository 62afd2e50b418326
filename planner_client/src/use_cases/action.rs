// Per-action request lifecycle shared by every view.

/// Display state of one user action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Handle for one in-flight request. Only the latest ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// State machine `idle -> loading -> success | error`.
///
/// `begin` refuses while a request is loading, which is the only duplicate
/// guard (the submit control is disabled). A ticket settles at most once and
/// only while it is the latest one issued. Views are rebuilt on navigation,
/// so a response for a view that was left never reaches the new instance.
#[derive(Debug, Default)]
pub struct Action {
    state: ActionState,
    issued: u64,
}

impl Action {
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ActionState::Loading
    }

    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_loading() {
            return None;
        }
        self.issued += 1;
        self.state = ActionState::Loading;
        Some(Ticket(self.issued))
    }

    /// Returns false when the ticket is stale and the result was discarded.
    pub fn succeed(&mut self, ticket: Ticket) -> bool {
        self.settle(ticket, ActionState::Success)
    }

    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        self.settle(ticket, ActionState::Error(message.into()))
    }

    fn settle(&mut self, ticket: Ticket, next: ActionState) -> bool {
        if ticket.0 != self.issued || !self.is_loading() {
            tracing::debug!(ticket = ticket.0, current = self.issued, "stale result discarded.");
            return false;
        }
        self.state = next;
        true
    }
}
