//! Fakes for the application ports.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use janitor_domain::{LogEntry, RawResponse};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::ports::{
    Clock, CollectorError, ConsoleSink, LogCollector, PreparedRequest, Transport, TransportError,
};

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Console sink recording every entry it receives.
#[derive(Default)]
pub struct CapturingConsole {
    pub entries: Mutex<Vec<LogEntry>>,
}

impl ConsoleSink for CapturingConsole {
    fn write(&self, entry: &LogEntry) {
        self.entries.lock().push(entry.clone());
    }
}

/// Collector forwarding delivered entries to a channel.
pub struct RecordingCollector {
    sender: mpsc::UnboundedSender<LogEntry>,
    fail: bool,
}

impl RecordingCollector {
    pub fn new(fail: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<LogEntry>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender, fail }), receiver)
    }
}

#[async_trait]
impl LogCollector for RecordingCollector {
    async fn deliver(&self, entry: &LogEntry) -> Result<(), CollectorError> {
        let _ = self.sender.send(entry.clone());
        if self.fail {
            return Err(CollectorError::Unreachable("offline".to_string()));
        }
        Ok(())
    }
}

/// Transport replaying scripted results and recording requests.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    fallback: Mutex<Option<RawResponse>>,
    pub requests: Mutex<Vec<PreparedRequest>>,
}

impl FakeTransport {
    /// Answers every request with `response`.
    pub fn always(response: RawResponse) -> Self {
        let transport = Self::default();
        *transport.fallback.lock() = Some(response);
        transport
    }

    /// Queues one result, consumed before the fallback.
    pub fn push(&self, result: Result<RawResponse, TransportError>) {
        self.script.lock().push_back(result);
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(request.clone());
        if let Some(result) = self.script.lock().pop_front() {
            return result;
        }
        self.fallback
            .lock()
            .clone()
            .ok_or_else(|| TransportError::NoResponse("connection refused".to_string()))
    }
}
