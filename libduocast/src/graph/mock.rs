//! Recording Graph transport for tests
//!
//! `MockTransport` records every call (path and body) in issue order and
//! answers from scripted replies. Calls without a script get a fresh
//! `{"id": "<resource>-<n>"}` body. It also tracks how many calls were in
//! flight at once so tests can assert on concurrent fan-out.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use super::{GraphResponse, GraphTransport};
use crate::error::{PlatformError, Result};

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

impl RecordedCall {
    /// Last path segment, e.g. `media` for `1234/media`
    pub fn resource(&self) -> &str {
        resource_of(&self.path)
    }

    /// String value of a body field, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.body.get(name).is_some()
    }
}

/// Scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this status and JSON body
    Json(u16, Value),
    /// Fail the request as a transport error
    NetworkError(String),
}

impl MockReply {
    pub fn id(id: &str) -> Self {
        MockReply::Json(200, json!({ "id": id }))
    }

    pub fn error(message: &str) -> Self {
        MockReply::Json(400, json!({ "error": { "message": message } }))
    }
}

struct BodyRule {
    field: String,
    value: Value,
    reply: MockReply,
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    queued: HashMap<String, VecDeque<MockReply>>,
    rules: Vec<BodyRule>,
    generated: usize,
    in_flight: usize,
    max_in_flight: usize,
}

/// Mock Graph transport
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    delay: Duration,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply (simulates latency so concurrent calls overlap)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue a reply for the next call to `resource` (`feed`, `media`, ...)
    pub fn on(self, resource: &str, reply: MockReply) -> Self {
        self.lock()
            .queued
            .entry(resource.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Reply to every call whose body has `field == value`
    ///
    /// Body rules take precedence over queued replies.
    pub fn on_body(self, field: &str, value: impl Into<Value>, reply: MockReply) -> Self {
        self.lock().rules.push(BodyRule {
            field: field.to_string(),
            value: value.into(),
            reply,
        });
        self
    }

    /// All calls in the order they were issued
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Calls to a given resource, in issue order
    pub fn calls_to(&self, resource: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.resource() == resource)
            .cloned()
            .collect()
    }

    /// Highest number of calls that were awaiting a reply at the same time
    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply_for(&self, call: &RecordedCall) -> MockReply {
        let mut state = self.lock();

        if let Some(rule) = state
            .rules
            .iter()
            .find(|r| call.body.get(&r.field) == Some(&r.value))
        {
            return rule.reply.clone();
        }

        if let Some(reply) = state
            .queued
            .get_mut(call.resource())
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }

        state.generated += 1;
        MockReply::id(&format!("{}-{}", call.resource(), state.generated))
    }
}

#[async_trait]
impl GraphTransport for MockTransport {
    async fn post(&self, path: &str, body: Value) -> Result<GraphResponse> {
        let call = RecordedCall {
            path: path.to_string(),
            body,
        };

        {
            let mut state = self.lock();
            state.calls.push(call.clone());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let reply = self.reply_for(&call);
        self.lock().in_flight -= 1;

        match reply {
            MockReply::Json(status, body) => Ok(GraphResponse::new(status, body)),
            MockReply::NetworkError(message) => Err(PlatformError::Network(message).into()),
        }
    }
}

fn resource_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
