//! Configuration data models

pub mod dispatch;
pub mod gateway;
pub mod provider;
pub mod server;

pub use dispatch::*;
pub use gateway::*;
pub use provider::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default retries per provider after the first attempt
pub fn default_max_retries() -> u32 {
    3
}

pub fn default_base_delay_ms() -> u64 {
    1_000
}

pub fn default_max_delay_ms() -> u64 {
    10_000
}

/// Default per-call timeout in seconds
pub fn default_call_timeout() -> u64 {
    30
}

/// Default whole-dispatch budget in seconds
pub fn default_total_timeout() -> u64 {
    120
}

pub fn default_true() -> bool {
    true
}
