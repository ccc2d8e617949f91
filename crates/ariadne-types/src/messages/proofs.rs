//! Proof presentation messages.

use super::message_types;
use crate::message::MessageHeader;
use serde::{Deserialize, Serialize};

/// Verifier → prover: request a proof over the given attributes/predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProofRequestMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub proof_request_json: String,
}

impl ProofRequestMessage {
    pub fn new(proof_request_json: impl Into<String>) -> Self {
        Self {
            proof_request_json: proof_request_json.into(),
            ..Self::default()
        }
    }
}

impl_message_shape!(ProofRequestMessage, message_types::PROOF_REQUEST);

/// Prover → verifier: the disclosed proof.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProofMessage {
    #[serde(flatten)]
    header: MessageHeader,
    pub proof_json: String,
}

impl ProofMessage {
    pub fn new(proof_json: impl Into<String>) -> Self {
        Self {
            proof_json: proof_json.into(),
            ..Self::default()
        }
    }
}

impl_message_shape!(ProofMessage, message_types::DISCLOSED_PROOF);
