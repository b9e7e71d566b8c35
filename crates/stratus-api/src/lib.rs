//! Async client for the Stratus cloud infrastructure account API.
//!
//! Exposes the handful of endpoints the CLI needs: account device
//! inventories (virtual guests, hardware, bandwidth pools) and the
//! metering subsystem's summary query. All calls are plain JSON REST
//! under `v1/`, authenticated with an `X-API-Key` header.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    AllotmentRef, BandwidthPool, Hardware, MetricDatum, SummaryDataType, VirtualGuest,
};
