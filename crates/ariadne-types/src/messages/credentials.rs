//! Credential issuance messages.
//!
//! The `*_json` payloads are produced and consumed by the ledger/wallet
//! provider; this engine carries them as opaque strings.

use super::message_types;
use crate::message::MessageHeader;
use serde::{Deserialize, Serialize};

/// Issuer → holder: a credential is available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialOfferMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub offer_json: String,
}

impl CredentialOfferMessage {
    pub fn new(offer_json: impl Into<String>) -> Self {
        Self {
            offer_json: offer_json.into(),
            ..Self::default()
        }
    }
}

impl_message_shape!(CredentialOfferMessage, message_types::CREDENTIAL_OFFER);

/// Holder → issuer: accept an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialRequestMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub request_json: String,
}

impl CredentialRequestMessage {
    pub fn new(request_json: impl Into<String>) -> Self {
        Self {
            request_json: request_json.into(),
            ..Self::default()
        }
    }
}

impl_message_shape!(CredentialRequestMessage, message_types::CREDENTIAL_REQUEST);

/// Issuer → holder: the issued credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialIssueMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub credential_json: String,
}

impl CredentialIssueMessage {
    pub fn new(credential_json: impl Into<String>) -> Self {
        Self {
            credential_json: credential_json.into(),
            ..Self::default()
        }
    }
}

impl_message_shape!(CredentialIssueMessage, message_types::CREDENTIAL_ISSUE);

/// Either side declines to continue the issuance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialRejectMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CredentialRejectMessage {
    pub fn new(comment: Option<String>) -> Self {
        Self {
            comment,
            ..Self::default()
        }
    }
}

impl_message_shape!(CredentialRejectMessage, message_types::CREDENTIAL_REJECT);
