//! Master-key request signing
//!
//! The service authenticates every REST call by recomputing an HMAC-SHA256
//! over a canonical rendering of the request and comparing it with the
//! `authorization` header. The canonical text is five newline-terminated
//! fields:
//!
//! ```text
//! {verb lowercase}\n{resource type lowercase}\n{resource id as-is}\n{date lowercase}\n\n
//! ```
//!
//! The digest is base64 encoded, percent encoded and wrapped as
//! `type={key type}&ver={token version}&sig={signature}`. Any byte of
//! difference, including the letter case of the resource id, fails
//! authentication.

use crate::transport::HttpMethod;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use colladmin_core::error::{Error, Result};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Canonical text that gets signed
pub fn canonical_payload(
    verb: HttpMethod,
    resource_type: &str,
    resource_id: &str,
    date: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.as_str().to_lowercase(),
        resource_type.to_lowercase(),
        resource_id,
        date.to_lowercase()
    )
}

/// Signs requests with a decoded master key
///
/// Holds no clock; the caller supplies the same date it sends in `x-ms-date`.
#[derive(Clone)]
pub struct MasterKeySigner {
    key: Vec<u8>,
    key_type: String,
    token_version: String,
}

impl std::fmt::Debug for MasterKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKeySigner")
            .field("key", &"***REDACTED***")
            .field("key_type", &self.key_type)
            .field("token_version", &self.token_version)
            .finish()
    }
}

impl MasterKeySigner {
    /// Decode `master_key` from base64
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyFormat`] when the key is not valid base64.
    pub fn new(
        master_key: &str,
        key_type: impl Into<String>,
        token_version: impl Into<String>,
    ) -> Result<Self> {
        let key = STANDARD
            .decode(master_key.trim())
            .map_err(|e| Error::invalid_key_format(format!("master key is not base64: {e}")))?;

        Ok(Self {
            key,
            key_type: key_type.into(),
            token_version: token_version.into(),
        })
    }

    /// Produce the `authorization` header value for one request
    pub fn sign(
        &self,
        verb: HttpMethod,
        resource_type: &str,
        resource_id: &str,
        date: &str,
    ) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| Error::invalid_key_format(format!("failed to initialize hmac: {e}")))?;
        mac.update(canonical_payload(verb, resource_type, resource_id, date).as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "type={}&ver={}&sig={}",
            self.key_type,
            self.token_version,
            utf8_percent_encode(&signature, NON_ALPHANUMERIC)
        ))
    }
}

/// One-shot signing: decode the key and sign a single request
pub fn generate_auth_token(
    verb: HttpMethod,
    resource_type: &str,
    resource_id: &str,
    master_key: &str,
    key_type: &str,
    token_version: &str,
    date: &str,
) -> Result<String> {
    MasterKeySigner::new(master_key, key_type, token_version)?.sign(
        verb,
        resource_type,
        resource_id,
        date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "Y29sbGFkbWluLXRlc3QtbWFzdGVyLWtleQ==";
    const DATE: &str = "Thu, 27 Apr 2017 00:51:12 GMT";

    fn token(verb: HttpMethod, resource_type: &str, resource_id: &str, date: &str) -> String {
        generate_auth_token(
            verb,
            resource_type,
            resource_id,
            KEY,
            "master",
            "1.0",
            date,
        )
        .unwrap()
    }

    #[test]
    fn test_canonical_payload_layout() {
        assert_eq!(
            canonical_payload(HttpMethod::Get, "COLLS", "dbs/ToDoList/colls/Items", DATE),
            "get\ncolls\ndbs/ToDoList/colls/Items\nthu, 27 apr 2017 00:51:12 gmt\n\n"
        );
    }

    #[test]
    fn test_known_signature() {
        assert_eq!(
            token(HttpMethod::Get, "colls", "dbs/ToDoList/colls/Items", DATE),
            "type=master&ver=1.0&sig=EYiwUIAQvlxxOn2qP3CVMqK5Y2k0gvQe2gQRflIsloo%3D"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let first = token(HttpMethod::Post, "offers", "", DATE);
        let second = token(HttpMethod::Post, "offers", "", DATE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_input_changes_signature() {
        let base = token(HttpMethod::Get, "colls", "dbs/db/colls/orders", DATE);

        assert_ne!(base, token(HttpMethod::Put, "colls", "dbs/db/colls/orders", DATE));
        assert_ne!(base, token(HttpMethod::Get, "offers", "dbs/db/colls/orders", DATE));
        assert_ne!(base, token(HttpMethod::Get, "colls", "dbs/db/colls/Orders", DATE));
        assert_ne!(
            base,
            token(
                HttpMethod::Get,
                "colls",
                "dbs/db/colls/orders",
                "Thu, 27 Apr 2017 00:51:13 GMT"
            )
        );
    }

    #[test]
    fn test_case_of_verb_type_and_date_does_not_matter() {
        assert_eq!(
            token(HttpMethod::Get, "COLLS", "dbs/db/colls/orders", DATE),
            token(
                HttpMethod::Get,
                "colls",
                "dbs/db/colls/orders",
                "THU, 27 APR 2017 00:51:12 GMT"
            )
        );
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let result = generate_auth_token(
            HttpMethod::Get,
            "colls",
            "dbs/db/colls/orders",
            "not base64!!",
            "master",
            "1.0",
            DATE,
        );
        assert!(matches!(result, Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let signer = MasterKeySigner::new(KEY, "master", "1.0").unwrap();
        assert!(!format!("{signer:?}").contains(KEY));
    }
}
