//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_API_VERSION: &str = "2018-12-31";
pub(crate) const DEFAULT_KEY_TYPE: &str = "master";
pub(crate) const DEFAULT_TOKEN_VERSION: &str = "1.0";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

pub(crate) fn default_key_type() -> String {
    DEFAULT_KEY_TYPE.to_string()
}

pub(crate) fn default_token_version() -> String {
    DEFAULT_TOKEN_VERSION.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
