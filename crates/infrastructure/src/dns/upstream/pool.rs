use super::handle::UpstreamHandle;
use super::strategy::Strategy;
use crate::dns::codec::{MessageBuilder, MessageCodec};
use async_trait::async_trait;
use ferrous_resolve_application::events::{ResolutionEvent, ResolutionEventEmitter};
use ferrous_resolve_application::ports::UpstreamPort;
use ferrous_resolve_domain::{DnsMessage, DnsRecord, DomainError, UpstreamConfig};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Ordered set of upstream servers with one selection strategy.
///
/// Each query goes to exactly one upstream; a failed exchange is not retried
/// on another server.
#[derive(Debug)]
pub struct UpstreamPool {
    handles: Vec<UpstreamHandle>,
    strategy: Strategy,
    emitter: ResolutionEventEmitter,
}

impl UpstreamPool {
    pub fn new(handles: Vec<UpstreamHandle>, strategy: Strategy) -> Result<Self, DomainError> {
        if handles.is_empty() {
            return Err(DomainError::Config(
                "at least one upstream server is required".to_string(),
            ));
        }

        Ok(Self {
            handles,
            strategy,
            emitter: ResolutionEventEmitter::new_disabled(),
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let handles = config
            .servers
            .iter()
            .map(UpstreamHandle::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(handles, Strategy::from_config(config.strategy))
    }

    pub fn with_emitter(mut self, emitter: ResolutionEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn handles(&self) -> &[UpstreamHandle] {
        &self.handles
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    async fn exchange(
        handle: &UpstreamHandle,
        request_id: u16,
        bytes: &[u8],
    ) -> Result<DnsMessage, DomainError> {
        let response_bytes = handle.exchange(bytes).await?;
        let response = MessageCodec::decode(&response_bytes)?;

        if response.id() != request_id {
            return Err(DomainError::ResponseIdMismatch {
                server: handle.addr().to_string(),
                expected: request_id,
                received: response.id(),
            });
        }
        Ok(response)
    }

    fn observed_rtt(handle: &UpstreamHandle, elapsed: Duration, error: Option<&DomainError>) -> Duration {
        match error {
            Some(DomainError::TransportTimeout { .. }) => elapsed.max(handle.timeout()),
            _ => elapsed,
        }
    }
}

#[async_trait]
impl UpstreamPort for UpstreamPool {
    async fn query(&self, request: &DnsMessage) -> Vec<DnsRecord> {
        let Some(question) = request.first_question() else {
            return Vec::new();
        };
        let Some(handle) = self.strategy.select(&self.handles) else {
            return Vec::new();
        };

        let (request_id, bytes) = match MessageBuilder::build_query(question) {
            Ok(built) => built,
            Err(e) => {
                warn!(domain = %question.domain, error = %e, "Failed to build upstream query");
                return Vec::new();
            }
        };

        let start = Instant::now();
        let result = Self::exchange(handle, request_id, &bytes).await;
        let rtt = Self::observed_rtt(handle, start.elapsed(), result.as_ref().err());
        handle.record_rtt(rtt);

        self.emitter.emit(ResolutionEvent::UpstreamExchange {
            server: handle.name().clone(),
            rtt_us: rtt.as_micros() as u64,
            success: result.is_ok(),
        });

        match result {
            Ok(response) => {
                debug!(
                    server = %handle.name(),
                    domain = %question.domain,
                    record_type = %question.record_type,
                    rcode = response.header.response_code.as_str(),
                    answers = response.answers.len(),
                    rtt_ms = rtt.as_millis() as u64,
                    "Upstream answered"
                );
                response.answers
            }
            Err(e) => {
                warn!(
                    server = %handle.name(),
                    domain = %question.domain,
                    record_type = %question.record_type,
                    error = %e,
                    "Upstream query failed"
                );
                Vec::new()
            }
        }
    }
}
