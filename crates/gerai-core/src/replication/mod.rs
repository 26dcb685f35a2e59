//! One-way replication to an external sink
//!
//! Each new record can be mirrored to a response-blind endpoint, typically a
//! spreadsheet web app. The sink never acknowledges anything we can read, so
//! the only observable result is whether the outbound transmission raised a
//! transport fault.
//!
//! - `payload`: the sink's wire shape
//! - `transport`: the narrow `Transport` seam and its HTTP implementation
//! - `client`: `ReplicationClient`, which never lets a fault escape

pub mod client;
pub mod payload;
pub mod transport;

pub use client::{ReplicationClient, ReplicationOutcome};
pub use payload::SinkPayload;
pub use transport::{parse_sink_url, HttpTransport, Transport, TransportError};
