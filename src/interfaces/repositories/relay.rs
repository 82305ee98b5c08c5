use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::RelayError;

/// One templated message for the transactional e-mail relay.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutboundMessage {
    pub service_id: String,
    pub template_id: String,
    pub template_params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayReceipt {
    pub status: u16,
    pub text: String,
}

impl RelayReceipt {
    pub fn ok() -> Self {
        RelayReceipt { status: 200, text: "OK".to_string() }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRelay: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<RelayReceipt, RelayError>;

    fn name(&self) -> &'static str;
}
