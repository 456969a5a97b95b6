// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layer that records every RPC call with `tracing`.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// Wraps each RPC request in an `rpc_call` span and logs method and latency.
///
/// Payloads are only logged at TRACE when [`LoggingLayer::verbose`] is set;
/// a 200-point chart issues several hundred calls per wave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoggingLayer {
    payloads: bool,
}

impl LoggingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request and response payloads at TRACE level.
    pub fn verbose(mut self) -> Self {
        self.payloads = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService {
            inner,
            payloads: self.payloads,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    inner: S,
    payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let method = method_label(&request);
        let payloads = self.payloads;
        if payloads {
            trace!(method = %method, request = ?request, "RPC request");
        }

        let span = tracing::debug_span!("rpc_call", method = %method);
        let call = self.inner.call(request);

        Box::pin(
            async move {
                let started = Instant::now();
                let result = call.await;
                let elapsed_ms = started.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) if payloads => {
                        trace!(elapsed_ms, response = ?response, "RPC response")
                    }
                    Ok(_) => debug!(elapsed_ms, "RPC response"),
                    Err(e) => warn!(elapsed_ms, error = %e, "RPC call failed"),
                }
                result
            }
            .instrument(span),
        )
    }
}

/// Method name of a single request, or a batch summary.
fn method_label(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_layer_default_is_quiet() {
        assert!(!LoggingLayer::new().payloads);
    }

    #[test]
    fn test_verbose_carries_into_service() {
        let service = LoggingLayer::new().verbose().layer(());
        assert!(service.payloads);
    }
}
