//! Remote stats backend: transport, typed client, circuit breaker.

pub mod circuit_breaker;
pub mod client;
pub mod error;
pub mod transport;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use client::{ModelRequest, StatsClient};
pub use error::ApiError;
pub use transport::{HttpResponse, HttpTransport, Method, RecordedRequest, ScriptedTransport, Transport};
