//! S3-compatible object deletion with SigV4 request signing.
//!
//! Only the one operation the cascade needs (`DeleteObject`) is
//! implemented, so the signer is hand-built on hmac/sha2 rather than
//! pulling a full SDK. Path-style addressing keeps it working against
//! MinIO and other S3-compatible stores.

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::instrument;

use super::{ObjectStorage, StorageError};
use crate::config::StorageConfig;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of the empty payload; DELETE requests carry no body.
const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Client for an S3-compatible media bucket.
#[derive(Clone)]
pub struct S3Storage {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
    region: String,
    access_key: String,
    secret_key: SecretString,
}

impl S3Storage {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    fn host(&self) -> String {
        self.endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string()
    }

    /// SigV4 authorization header value for a bodyless request.
    fn sign(&self, method: &str, uri: &str, amz_date: &str) -> String {
        let date = amz_date.get(..8).unwrap_or_default();
        let host = self.host();

        let canonical_headers = format!(
            "host:{host}\nx-amz-content-sha256:{EMPTY_PAYLOAD_SHA256}\nx-amz-date:{amz_date}\n"
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";
        let canonical_request = format!(
            "{method}\n{uri}\n\n{canonical_headers}\n{signed_headers}\n{EMPTY_PAYLOAD_SHA256}"
        );

        let scope = format!("{date}/{}/s3/aws4_request", self.region);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let secret = format!("AWS4{}", self.secret_key.expose_secret());
        let date_key = hmac_sha256(secret.as_bytes(), date.as_bytes());
        let region_key = hmac_sha256(&date_key, self.region.as_bytes());
        let service_key = hmac_sha256(&region_key, b"s3");
        let signing_key = hmac_sha256(&service_key, b"aws4_request");
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        format!(
            "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.access_key
        )
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).unwrap_or_else(|_| {
        // HMAC accepts keys of any length; new_from_slice cannot fail.
        unreachable!("HMAC-SHA256 accepts any key length")
    });
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Percent-encode a key for the canonical URI (everything except
/// unreserved characters and `/`).
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

impl ObjectStorage for S3Storage {
    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let uri = format!("/{}/{}", self.bucket, encode_key(key));
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let authorization = self.sign("DELETE", &uri, &amz_date);

        let response = self
            .http
            .delete(format!("{}{uri}", self.endpoint))
            .header("Host", self.host())
            .header("x-amz-content-sha256", EMPTY_PAYLOAD_SHA256)
            .header("x-amz-date", &amz_date)
            .header("Authorization", authorization)
            .send()
            .await?;

        let status = response.status();
        // 404 means the object is already gone, which is fine.
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(StorageError::Api {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_keys_preserving_slashes() {
        assert_eq!(encode_key("media/clock 01.jpg"), "media/clock%2001.jpg");
        assert_eq!(encode_key("plain.jpg"), "plain.jpg");
    }

    #[test]
    fn signing_is_deterministic_for_fixed_inputs() {
        let storage = S3Storage {
            http: reqwest::Client::new(),
            endpoint: "https://objects.example.com".to_string(),
            bucket: "wrenfield-media".to_string(),
            region: "us-east-1".to_string(),
            access_key: "AKIDEXAMPLE".to_string(),
            secret_key: SecretString::from("secret"),
        };
        let first = storage.sign("DELETE", "/wrenfield-media/a.jpg", "20250101T000000Z");
        let second = storage.sign("DELETE", "/wrenfield-media/a.jpg", "20250101T000000Z");
        assert_eq!(first, second);
        assert!(first.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20250101/"));
    }
}
