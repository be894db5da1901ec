use super::response::{blocked_response, create_response, format_error_response};
use crate::events::{ResolutionEvent, ResolutionEventEmitter, ResolutionStage};
use crate::ports::{BlocklistPort, RecordCachePort, UpstreamPort, WorkItem};
use ferrous_resolve_domain::{min_ttl, DnsMessage, DnsQuery};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Answers queries from the blocklist, the record cache and the upstream pool,
/// in that order.
pub struct ResolutionEngine {
    blocklist: Arc<dyn BlocklistPort>,
    cache: Option<Arc<dyn RecordCachePort>>,
    upstream: Arc<dyn UpstreamPort>,
    emitter: ResolutionEventEmitter,
}

impl ResolutionEngine {
    pub fn new(
        blocklist: Arc<dyn BlocklistPort>,
        cache: Arc<dyn RecordCachePort>,
        upstream: Arc<dyn UpstreamPort>,
    ) -> Self {
        Self {
            blocklist,
            cache: Some(cache),
            upstream,
            emitter: ResolutionEventEmitter::new_disabled(),
        }
    }

    /// Skip the cache stage: nothing is read from or written to the cache.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn with_emitter(mut self, emitter: ResolutionEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Resolve the item's query and hand the response back to its transport.
    pub async fn process(&self, item: Box<dyn WorkItem>) {
        let response = self.resolve(item.message()).await;
        let id = response.header.id;
        let protocol = item.protocol();
        let received_at = item.received_at();

        if let Err(e) = item.respond(response).await {
            warn!(error = %e, id, protocol = %protocol, "Failed to deliver response");
            return;
        }
        self.emitter.emit(ResolutionEvent::Responded {
            protocol,
            duration_us: received_at.elapsed().as_micros() as u64,
        });
    }

    /// Build the response for `request`. Never fails: every path ends in a
    /// well-formed message.
    pub async fn resolve(&self, request: &DnsMessage) -> DnsMessage {
        let start = Instant::now();

        let Some(question) = request.first_question() else {
            debug!(id = request.header.id, "Query without question, answering FORMERR");
            self.emit_resolved(ResolutionStage::FormatError, start);
            return format_error_response(request);
        };

        self.emitter.emit(ResolutionEvent::QueryReceived {
            domain: Arc::clone(&question.domain),
            record_type: question.record_type,
        });

        let (response, stage) = self.run_pipeline(request, question).await;

        debug!(
            domain = %question.domain,
            record_type = %question.record_type,
            stage = stage.as_str(),
            answers = response.answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query resolved"
        );
        self.emit_resolved(stage, start);
        response
    }

    async fn run_pipeline(
        &self,
        request: &DnsMessage,
        question: &DnsQuery,
    ) -> (DnsMessage, ResolutionStage) {
        let name = question.lookup_name();
        let record_type = question.record_type;

        if let Some(entry) = self.blocklist.query(&name) {
            debug!(
                domain = %name,
                category = %entry.category,
                reason = %entry.reason,
                "Domain blocked"
            );
            self.emitter.emit(ResolutionEvent::Blocked {
                domain: Arc::clone(&question.domain),
                category: entry.category.clone(),
                reason: entry.reason.clone(),
            });
            return (blocked_response(request, question), ResolutionStage::Blocked);
        }

        let mut stamp = None;
        if let Some(cache) = &self.cache {
            if let Some(records) = cache.query(&name, record_type) {
                self.emitter.emit(ResolutionEvent::CacheHit {
                    domain: Arc::clone(&question.domain),
                    record_type,
                });
                return (create_response(request, records, true), ResolutionStage::Cache);
            }
            self.emitter.emit(ResolutionEvent::CacheMiss {
                domain: Arc::clone(&question.domain),
                record_type,
            });
            // Taken before the exchange so a slow, older answer cannot
            // overwrite one fetched later.
            stamp = Some(cache.begin_write());
        }

        let records = self.upstream.query(request).await;
        if !records.is_empty() {
            if let (Some(cache), Some(stamp), Some(ttl)) = (&self.cache, stamp, min_ttl(&records)) {
                cache.add(
                    &name,
                    record_type,
                    records.clone(),
                    Duration::from_secs(u64::from(ttl)),
                    stamp,
                );
            }
            return (
                create_response(request, records, false),
                ResolutionStage::Upstream,
            );
        }

        (
            create_response(request, Vec::new(), false),
            ResolutionStage::Fallback,
        )
    }

    fn emit_resolved(&self, stage: ResolutionStage, start: Instant) {
        self.emitter.emit(ResolutionEvent::Resolved {
            stage,
            duration_us: start.elapsed().as_micros() as u64,
        });
    }
}
