#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    BlocklistPort, RecordCachePort, UpstreamPort, WorkItem,
};
use ferrous_resolve_domain::{
    to_fqdn, BlockEntry, DnsMessage, DnsQuery, DnsRecord, DomainError, Protocol, RecordData,
    RecordType,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

pub fn a_record(name: &str, ip: [u8; 4], ttl: u32) -> DnsRecord {
    DnsRecord::new(to_fqdn(name), ttl, RecordData::A(Ipv4Addr::from(ip)))
}

pub fn query_message(id: u16, domain: &str, record_type: RecordType) -> DnsMessage {
    DnsMessage::query(id, DnsQuery::new(domain, record_type))
}

#[derive(Default)]
pub struct MockBlocklist {
    entries: HashMap<String, BlockEntry>,
}

impl MockBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, domain: &str, category: &str, reason: &str) -> Self {
        let entry = BlockEntry::new(domain, category, reason);
        self.entries.insert(entry.fqdn(), entry);
        self
    }
}

impl BlocklistPort for MockBlocklist {
    fn query(&self, name: &str) -> Option<&BlockEntry> {
        self.entries.get(&to_fqdn(name))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

type MockEntry = (Vec<DnsRecord>, Duration, u64);

#[derive(Default)]
pub struct MockRecordCache {
    entries: RwLock<HashMap<(String, RecordType), MockEntry>>,
    stamps: AtomicU64,
    adds: AtomicUsize,
    queries: AtomicUsize,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, record_type: RecordType, records: Vec<DnsRecord>) {
        self.entries.write().unwrap().insert(
            (to_fqdn(name), record_type),
            (records, Duration::from_secs(300), 0),
        );
    }

    pub fn stored_ttl(&self, name: &str, record_type: RecordType) -> Option<Duration> {
        self.entries
            .read()
            .unwrap()
            .get(&(to_fqdn(name), record_type))
            .map(|(_, ttl, _)| *ttl)
    }

    pub fn stored_stamp(&self, name: &str, record_type: RecordType) -> Option<u64> {
        self.entries
            .read()
            .unwrap()
            .get(&(to_fqdn(name), record_type))
            .map(|(_, _, stamp)| *stamp)
    }

    pub fn add_count(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl RecordCachePort for MockRecordCache {
    fn begin_write(&self) -> u64 {
        self.stamps.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn add(
        &self,
        name: &str,
        record_type: RecordType,
        records: Vec<DnsRecord>,
        ttl: Duration,
        stamp: u64,
    ) {
        self.adds.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().unwrap();
        let key = (to_fqdn(name), record_type);
        if entries.get(&key).is_some_and(|(_, _, current)| *current > stamp) {
            return;
        }
        entries.insert(key, (records, ttl, stamp));
    }

    fn query(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.entries
            .read()
            .unwrap()
            .get(&(to_fqdn(name), record_type))
            .map(|(records, _, _)| records.clone())
    }
}

/// Upstream that returns a fixed answer and counts its calls.
#[derive(Default)]
pub struct SpyUpstream {
    answer: Mutex<Vec<DnsRecord>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<DnsMessage>>,
}

impl SpyUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(records: Vec<DnsRecord>) -> Self {
        let spy = Self::default();
        *spy.answer.lock().unwrap() = records;
        spy
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<DnsMessage> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamPort for SpyUpstream {
    async fn query(&self, request: &DnsMessage) -> Vec<DnsRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.answer.lock().unwrap().clone()
    }
}

/// Work item that hands its response to a oneshot channel.
pub struct RecordingWorkItem {
    message: DnsMessage,
    protocol: Protocol,
    received_at: Instant,
    reply: oneshot::Sender<DnsMessage>,
}

impl RecordingWorkItem {
    pub fn new(message: DnsMessage) -> (Box<Self>, oneshot::Receiver<DnsMessage>) {
        let (reply, rx) = oneshot::channel();
        let item = Box::new(Self {
            message,
            protocol: Protocol::Udp,
            received_at: Instant::now(),
            reply,
        });
        (item, rx)
    }
}

#[async_trait]
impl WorkItem for RecordingWorkItem {
    fn message(&self) -> &DnsMessage {
        &self.message
    }

    fn protocol(&self) -> Protocol {
        self.protocol
    }

    fn received_at(&self) -> Instant {
        self.received_at
    }

    async fn respond(self: Box<Self>, response: DnsMessage) -> Result<(), DomainError> {
        self.reply
            .send(response)
            .map_err(|_| DomainError::RespondFailed("receiver dropped".to_string()))
    }
}

/// Work item whose transport is gone.
pub struct BrokenWorkItem {
    pub message: DnsMessage,
    pub attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl WorkItem for BrokenWorkItem {
    fn message(&self) -> &DnsMessage {
        &self.message
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    fn received_at(&self) -> Instant {
        Instant::now()
    }

    async fn respond(self: Box<Self>, _response: DnsMessage) -> Result<(), DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::RespondFailed("connection reset".to_string()))
    }
}
