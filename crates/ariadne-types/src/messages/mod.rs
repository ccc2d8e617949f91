//! Concrete message shapes exchanged between agents.

/// Implements [`MessageShape`](crate::message::MessageShape) for a struct
/// with a `header: MessageHeader` field.
macro_rules! impl_message_shape {
    ($shape:ty, $message_type:expr) => {
        impl $crate::message::MessageShape for $shape {
            const MESSAGE_TYPE: &'static str = $message_type;

            fn header(&self) -> &$crate::message::MessageHeader {
                &self.header
            }

            fn header_mut(&mut self) -> &mut $crate::message::MessageHeader {
                &mut self.header
            }
        }
    };
}

pub mod credentials;
pub mod proofs;
pub mod routing;
pub mod trust_ping;

pub use credentials::{
    CredentialIssueMessage, CredentialOfferMessage, CredentialRejectMessage,
    CredentialRequestMessage,
};
pub use proofs::{ProofMessage, ProofRequestMessage};
pub use routing::{ForwardMessage, ForwardToKeyMessage};
pub use trust_ping::{TrustPingMessage, TrustPingResponseMessage};

/// Canonical `@type` discriminators.
pub mod message_types {
    pub const TRUST_PING: &str = "trust_ping";
    pub const TRUST_PING_RESPONSE: &str = "trust_ping_response";
    pub const FORWARD: &str = "forward";
    pub const FORWARD_TO_KEY: &str = "forward_to_key";
    pub const CREDENTIAL_OFFER: &str = "credential_offer";
    pub const CREDENTIAL_REQUEST: &str = "credential_request";
    pub const CREDENTIAL_ISSUE: &str = "credential_issue";
    pub const CREDENTIAL_REJECT: &str = "credential_reject";
    pub const PROOF_REQUEST: &str = "proof_request";
    pub const DISCLOSED_PROOF: &str = "disclosed_proof";
}
