//! Span constructors for balancegraph operations.
//!
//! Session actions (`graph_balance`, `zoom`, `connect`) open root spans;
//! the sampler nests one span per request wave beneath them. Per-call RPC
//! spans come from [`crate::transport::LoggingLayer`] instead.

pub(crate) mod spans;
