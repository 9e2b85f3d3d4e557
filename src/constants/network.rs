/// Default request timeout for the HTTP network provider
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Default request timeout for the hardware wallet bridge
pub const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 10;

/// Default endpoint of the local hardware wallet bridge
pub const DEFAULT_BRIDGE_ENDPOINT: &str = "http://127.0.0.1:9478";
