//! Execution sessions: the request/response/cancel/credit lifecycle of
//! running a workflow graph against the remote executor.
//!
//! One editor instance owns at most one [`ExecutionSession`], and the session
//! runs at most one executor request at a time. A submit:
//!
//! 1. is guarded synchronously (non-blank query, not already running,
//!    non-empty graph, remaining credits); guard failures never consume a
//!    credit and never leave `Idle`;
//! 2. consumes one credit at intent-to-run, before the network call;
//! 3. serializes the graph as of that instant and awaits the executor,
//!    racing a cooperative [`CancelHandle`];
//! 4. settles: the answer (or failure notice) is appended to the message
//!    log, a successful answer is also written into the graph's output node,
//!    and the session returns to `Idle`.
//!
//! Cancelled and failed runs do not refund their credit.

pub mod cancel;
pub mod credits;
pub mod executor;

pub use cancel::CancelHandle;
pub use credits::CreditLedger;
pub use executor::{ExecuteBody, ExecuteResponse, Executor, ExecutorError, HttpExecutor};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{info, warn};

use crate::graph::node::output_result_patch;
use crate::graph::GraphStore;
use crate::message::Message;
use crate::notify::{Notice, NoticeSender};
use crate::request::serialize;
use crate::types::NodeType;

/// Whether a session currently has a run in flight.
///
/// Terminal results (success, failure, cancellation) are not states the
/// session rests in: each run settles back to `Idle` immediately, with the
/// result recorded as the [`RunOutcome`] returned from
/// [`ExecutionSession::submit`] and kept in
/// [`last_outcome`](ExecutionSession::last_outcome).
///
/// `submit` holds the session exclusively for the whole run, so a reader of
/// [`status`](ExecutionSession::status) from safe code only ever observes
/// `Idle`; `Running` is the session's own in-flight marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
}

/// How a run settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The executor produced a non-empty answer.
    Succeeded { answer: String },
    /// The executor failed, or answered with nothing usable.
    Failed { reason: String },
    /// The user stopped the run; any late executor result was discarded.
    Cancelled,
}

/// Synchronous submit rejections. None of these consume a credit or leave
/// `Idle`.
#[derive(Debug, Error, Diagnostic)]
pub enum SubmitError {
    #[error("query is blank")]
    #[diagnostic(code(stackweave::session::blank_query))]
    BlankQuery,

    /// A run is already in flight. `submit` requires `&mut self`, which
    /// already prevents re-entry; this variant keeps the admission rule
    /// explicit for entry points that share the session behind a lock.
    #[error("a run is already in flight")]
    #[diagnostic(
        code(stackweave::session::busy),
        help("Wait for the current run to settle or cancel it first.")
    )]
    Busy,

    #[error("workflow is empty")]
    #[diagnostic(
        code(stackweave::session::empty_workflow),
        help("Add at least one node to the canvas before running.")
    )]
    EmptyWorkflow,

    #[error("no credits remaining this session")]
    #[diagnostic(
        code(stackweave::session::out_of_credits),
        help("Start a new editor session to reset the quota.")
    )]
    OutOfCredits,
}

/// Orchestrates one outstanding run and its conversation view.
pub struct ExecutionSession<E> {
    executor: E,
    ledger: CreditLedger,
    messages: Vec<Message>,
    status: SessionStatus,
    last_outcome: Option<RunOutcome>,
    cancel: CancelHandle,
    notices: NoticeSender,
}

impl<E: Executor> ExecutionSession<E> {
    #[must_use]
    pub fn new(executor: E, ledger: CreditLedger, notices: NoticeSender) -> Self {
        Self {
            executor,
            ledger,
            messages: Vec::new(),
            status: SessionStatus::Idle,
            last_outcome: None,
            cancel: CancelHandle::new(),
            notices,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The append-only conversation log: user queries, executor answers,
    /// system notices. Discarded with the session.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    /// How the most recent run settled, if any run has settled yet.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last_outcome.as_ref()
    }

    /// A handle that cancels the in-flight run from another task or event
    /// handler.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run the current graph against the executor with the given query.
    ///
    /// The serialized request reflects `store` at this instant; edits made
    /// while the run is in flight do not alter it. A successful answer is
    /// appended to the message log and written into the graph's `Output`
    /// node (if one exists) at response time, last write winning.
    pub async fn submit(
        &mut self,
        store: &mut GraphStore,
        query: &str,
    ) -> Result<RunOutcome, SubmitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SubmitError::BlankQuery);
        }
        if self.status == SessionStatus::Running {
            return Err(SubmitError::Busy);
        }
        if store.is_empty() {
            self.notices
                .send(Notice::error("Workflow is empty. Please add nodes first."));
            return Err(SubmitError::EmptyWorkflow);
        }
        if !self.ledger.try_consume() {
            self.notices.send(Notice::error(
                "Insufficient Credits: you have used all your free session credits.",
            ));
            self.messages.push(Message::system(
                "Error: Insufficient Credits. Start a new session to reset.",
            ));
            return Err(SubmitError::OutOfCredits);
        }

        // Credit spent; the run is committed from here on.
        self.cancel.reset();
        self.messages.push(Message::user(query));
        self.status = SessionStatus::Running;
        info!(remaining = self.ledger.remaining(), "submitting workflow run");

        let request = serialize(store.nodes(), store.edges());

        let settled = tokio::select! {
            () = self.cancel.cancelled() => None,
            result = self.executor.run(&request, query) => Some(result),
        };

        // A cancel that lost the select race by a hair still wins: the
        // superseded result must produce no message and no store write.
        let outcome = match settled {
            None => self.settle_cancelled(),
            Some(_) if self.cancel.is_cancelled() => self.settle_cancelled(),
            Some(Ok(response)) if response.answer.trim().is_empty() => {
                self.settle_failed("No response received from AI".to_string())
            }
            Some(Ok(response)) => self.settle_succeeded(store, response.answer),
            Some(Err(err)) => self.settle_failed(err.detail()),
        };

        self.status = SessionStatus::Idle;
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn settle_succeeded(&mut self, store: &mut GraphStore, answer: String) -> RunOutcome {
        self.messages.push(Message::assistant(answer.clone()));
        if let Some(output) = store.find_by_type(NodeType::Output) {
            let id = output.id.clone();
            store.update_node_data(&id, output_result_patch(&answer));
        }
        self.notices.send(Notice::success("Response received"));
        RunOutcome::Succeeded { answer }
    }

    fn settle_failed(&mut self, reason: String) -> RunOutcome {
        warn!(%reason, "workflow run failed");
        self.messages.push(Message::system(format!("Error: {reason}")));
        self.notices
            .send(Notice::error(format!("Workflow Execution Failed: {reason}")));
        RunOutcome::Failed { reason }
    }

    fn settle_cancelled(&mut self) -> RunOutcome {
        info!("workflow run cancelled");
        self.messages
            .push(Message::system("Request cancelled by user."));
        RunOutcome::Cancelled
    }
}
