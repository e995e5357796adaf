//! Credential model shared with the Herald applet.
//!
//! The whole set of platform credentials is stored as one JSON blob in the
//! OS secret service. Field names are the wire format the applet
//! deserializes at runtime, so they must not change.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// All platform credentials gathered by the setup wizard.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    // X/Twitter OAuth 1.0a
    pub twitter_consumer_key: Option<String>,
    pub twitter_consumer_secret: Option<String>,
    pub twitter_access_token: Option<String>,
    pub twitter_access_secret: Option<String>,

    // BlueSky
    pub bluesky_handle: Option<String>,
    pub bluesky_app_password: Option<String>,

    // Nostr
    pub nostr_nsec: Option<String>,
    pub nostr_use_pleb_signer: bool,
    pub nostr_image_host_url: Option<String>,
    pub nostr_relays: Vec<String>,

    // Threads
    pub threads_access_token: Option<String>,
    pub threads_user_id: Option<String>,
}

impl Credentials {
    /// Serialize to the JSON wire format stored in the secret service.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow!("failed to serialize credentials: {e}"))
    }

    /// Parse a blob previously written by [`Credentials::to_json`].
    /// Fields absent from older blobs fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow!("failed to parse credentials: {e}"))
    }

    /// Check if X/Twitter is configured (all four OAuth pieces present).
    pub fn has_twitter(&self) -> bool {
        self.twitter_consumer_key.is_some()
            && self.twitter_consumer_secret.is_some()
            && self.twitter_access_token.is_some()
            && self.twitter_access_secret.is_some()
    }

    /// Check if BlueSky is configured.
    pub fn has_bluesky(&self) -> bool {
        self.bluesky_handle.is_some() && self.bluesky_app_password.is_some()
    }

    /// Check if Nostr is configured. An external signer counts even without
    /// a local key.
    pub fn has_nostr(&self) -> bool {
        self.nostr_use_pleb_signer || self.nostr_nsec.is_some()
    }

    /// Check if Threads is configured.
    pub fn has_threads(&self) -> bool {
        self.threads_access_token.is_some() && self.threads_user_id.is_some()
    }

    /// True when no platform is configured at all.
    pub fn is_empty(&self) -> bool {
        !self.has_twitter() && !self.has_bluesky() && !self.has_nostr() && !self.has_threads()
    }
}

/// Mask a secret for display: a short prefix followed by asterisks.
/// Values too short to keep a prefix are masked entirely.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = chars[..4].iter().collect();
        format!("{prefix}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_serializes_unset_fields_as_null() {
        let json = Credentials::default().to_json().expect("serialize");
        assert!(json.contains("\"twitter_consumer_key\":null"));
        assert!(json.contains("\"nostr_use_pleb_signer\":false"));
        assert!(json.contains("\"nostr_relays\":[]"));
    }

    #[test]
    fn json_round_trip_preserves_all_fields() {
        let credentials = Credentials {
            twitter_consumer_key: Some("ck".into()),
            twitter_consumer_secret: Some("cs".into()),
            twitter_access_token: Some("at".into()),
            twitter_access_secret: Some("as".into()),
            bluesky_handle: Some("user.bsky.social".into()),
            bluesky_app_password: Some("app-pass".into()),
            nostr_nsec: Some("nsec1abc".into()),
            nostr_use_pleb_signer: false,
            nostr_image_host_url: Some("https://img.example".into()),
            nostr_relays: vec!["wss://relay.damus.io".into()],
            threads_access_token: Some("tok".into()),
            threads_user_id: Some("12345".into()),
        };

        let json = credentials.to_json().expect("serialize");
        let parsed = Credentials::from_json(&json).expect("parse");
        assert_eq!(parsed, credentials);
    }

    #[test]
    fn parses_older_blob_with_missing_fields() {
        let json = r#"{"bluesky_handle": "user.bsky.social"}"#;
        let parsed = Credentials::from_json(json).expect("parse");
        assert_eq!(parsed.bluesky_handle.as_deref(), Some("user.bsky.social"));
        assert!(parsed.nostr_relays.is_empty());
        assert!(!parsed.nostr_use_pleb_signer);
    }

    #[test]
    fn rejects_malformed_blob() {
        assert!(Credentials::from_json("not json").is_err());
    }

    #[test]
    fn twitter_requires_all_four_pieces() {
        let mut credentials = Credentials {
            twitter_consumer_key: Some("ck".into()),
            twitter_consumer_secret: Some("cs".into()),
            twitter_access_token: Some("at".into()),
            ..Credentials::default()
        };
        assert!(!credentials.has_twitter());
        credentials.twitter_access_secret = Some("as".into());
        assert!(credentials.has_twitter());
    }

    #[test]
    fn external_signer_counts_as_configured_nostr() {
        let credentials = Credentials {
            nostr_use_pleb_signer: true,
            ..Credentials::default()
        };
        assert!(credentials.has_nostr());
        assert!(credentials.nostr_nsec.is_none());
    }

    #[test]
    fn empty_credentials_report_no_platforms() {
        assert!(Credentials::default().is_empty());
        let configured = Credentials {
            threads_access_token: Some("tok".into()),
            threads_user_id: Some("id".into()),
            ..Credentials::default()
        };
        assert!(!configured.is_empty());
    }

    #[test]
    fn redact_keeps_short_prefix_only() {
        assert_eq!(redact("nsec1verysecret"), "nsec****");
        assert_eq!(redact("abc"), "****");
        assert_eq!(redact(""), "****");
    }
}
