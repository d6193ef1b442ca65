//! Shared test fakes.
//!
//! Scripted transports and confirmers used across module tests. Fetch
//! and read calls can be gated on oneshot channels so tests control the
//! order responses land in, which is how the stale-response and
//! overlapping-sync races are reproduced deterministically.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::profile::{ProfileRecord, ProfileStatus};
use crate::transport::{Confirmer, LogTransport, ProfileTransport};

type Gate = oneshot::Receiver<()>;

fn pop_gate(gates: &Mutex<VecDeque<Gate>>) -> Option<Gate> {
    gates.lock().unwrap().pop_front()
}

/// Scripted profile transport.
#[derive(Default)]
pub struct FakeProfileTransport {
    records: Mutex<Vec<ProfileRecord>>,
    logs: Mutex<HashMap<String, String>>,
    cleared: Mutex<Vec<String>>,
    fetch_results: Mutex<VecDeque<Vec<ProfileRecord>>>,
    fetch_gates: Mutex<VecDeque<Gate>>,
    read_gates: Mutex<VecDeque<Gate>>,
    fail_fetch: AtomicBool,
    fetches: AtomicUsize,
    reads: AtomicUsize,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

impl FakeProfileTransport {
    pub fn new(records: Vec<ProfileRecord>) -> Arc<Self> {
        let fake = Self::default();
        *fake.records.lock().unwrap() = records;
        Arc::new(fake)
    }

    pub fn set_records(&self, records: Vec<ProfileRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn records_snapshot(&self) -> Vec<ProfileRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn set_log(&self, id: &str, text: &str) {
        self.logs
            .lock()
            .unwrap()
            .insert(id.to_string(), text.to_string());
    }

    pub fn cleared_ids(&self) -> Vec<String> {
        self.cleared.lock().unwrap().clone()
    }

    /// Makes every subsequent fetch fail (or succeed again).
    pub fn fail_next_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Queues a one-shot result for an upcoming fetch (FIFO; falls back
    /// to the current records when the queue is empty).
    pub fn push_fetch_result(&self, records: Vec<ProfileRecord>) {
        self.fetch_results.lock().unwrap().push_back(records);
    }

    /// Holds an upcoming fetch until the returned sender fires (FIFO).
    pub fn gate_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.fetch_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Holds an upcoming profile-log read until the returned sender
    /// fires (FIFO).
    pub fn gate_next_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.read_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileTransport for FakeProfileTransport {
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        // Scripted result and gate are claimed up front so call order
        // decides the pairing, not completion order.
        let scripted = self.fetch_results.lock().unwrap().pop_front();
        if let Some(gate) = pop_gate(&self.fetch_gates) {
            let _ = gate.await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Error::Transport("profile fetch failed".to_string()));
        }
        Ok(scripted.unwrap_or_else(|| self.records.lock().unwrap().clone()))
    }

    async fn read_log(&self, id: &str) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = pop_gate(&self.read_gates) {
            let _ = gate.await;
        }
        let text = self.logs.lock().unwrap().get(id).cloned();
        Ok(text.unwrap_or_else(|| format!("{id} log\n")))
    }

    async fn clear_log(&self, id: &str) -> Result<()> {
        self.cleared.lock().unwrap().push(id.to_string());
        self.logs.lock().unwrap().insert(id.to_string(), String::new());
        Ok(())
    }

    async fn connect(&self, _id: &str, _password: &str) -> Result<ProfileStatus> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(ProfileStatus::Connecting)
    }

    async fn disconnect(&self, _id: &str) -> Result<ProfileStatus> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(ProfileStatus::Disconnected)
    }
}

/// Scripted service/client log transport.
#[derive(Default)]
pub struct FakeLogTransport {
    service_text: Mutex<String>,
    client_text: Mutex<String>,
    service_scripts: Mutex<VecDeque<String>>,
    service_gates: Mutex<VecDeque<Gate>>,
    service_read_count: AtomicUsize,
    client_read_count: AtomicUsize,
    service_clear_count: AtomicUsize,
    client_clear_count: AtomicUsize,
    fail_read: AtomicBool,
    fail_clear: AtomicBool,
}

impl FakeLogTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_service_text(&self, text: &str) {
        *self.service_text.lock().unwrap() = text.to_string();
    }

    pub fn set_client_text(&self, text: &str) {
        *self.client_text.lock().unwrap() = text.to_string();
    }

    /// Queues a one-shot result for an upcoming service-log read.
    pub fn push_service_text(&self, text: &str) {
        self.service_scripts
            .lock()
            .unwrap()
            .push_back(text.to_string());
    }

    /// Holds an upcoming service-log read until the returned sender
    /// fires (FIFO).
    pub fn gate_next_service_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.service_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_read.store(fail, Ordering::SeqCst);
    }

    pub fn fail_clears(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    pub fn service_reads(&self) -> usize {
        self.service_read_count.load(Ordering::SeqCst)
    }

    pub fn service_clears(&self) -> usize {
        self.service_clear_count.load(Ordering::SeqCst)
    }

    pub fn client_clears(&self) -> usize {
        self.client_clear_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogTransport for FakeLogTransport {
    async fn read_service_log(&self) -> Result<String> {
        self.service_read_count.fetch_add(1, Ordering::SeqCst);
        let scripted = self.service_scripts.lock().unwrap().pop_front();
        if let Some(gate) = pop_gate(&self.service_gates) {
            let _ = gate.await;
        }
        if self.fail_read.load(Ordering::SeqCst) {
            return Err(Error::Transport("service log read failed".to_string()));
        }
        Ok(scripted.unwrap_or_else(|| self.service_text.lock().unwrap().clone()))
    }

    async fn clear_service_log(&self) -> Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(Error::Transport("service log clear failed".to_string()));
        }
        self.service_clear_count.fetch_add(1, Ordering::SeqCst);
        self.service_text.lock().unwrap().clear();
        Ok(())
    }

    async fn read_client_log(&self) -> Result<String> {
        self.client_read_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_read.load(Ordering::SeqCst) {
            return Err(Error::Transport("client log read failed".to_string()));
        }
        Ok(self.client_text.lock().unwrap().clone())
    }

    async fn clear_client_log(&self) -> Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(Error::Transport("client log clear failed".to_string()));
        }
        self.client_clear_count.fetch_add(1, Ordering::SeqCst);
        self.client_text.lock().unwrap().clear();
        Ok(())
    }
}

/// Confirmer that always answers the same way and counts prompts.
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn yes() -> Arc<Self> {
        Arc::new(Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn no() -> Arc<Self> {
        Arc::new(Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
