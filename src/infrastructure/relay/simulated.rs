use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::{
    errors::RelayError,
    repositories::relay::{MessageRelay, OutboundMessage, RelayReceipt},
};

/// Pretends to deliver: waits a fixed delay and reports success.
///
/// Backs the flows that never had a real delivery path (password reset,
/// newsletter signup) and the whole relay when no EmailJS account is set up.
#[derive(Debug, Clone)]
pub struct SimulatedRelay {
    delay: Duration,
}

impl SimulatedRelay {
    pub fn new(delay: Duration) -> Self {
        SimulatedRelay { delay }
    }
}

#[async_trait]
impl MessageRelay for SimulatedRelay {
    async fn send(&self, message: &OutboundMessage) -> Result<RelayReceipt, RelayError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        info!(
            service_id = %message.service_id,
            template_id = %message.template_id,
            "Simulated delivery of outbound message"
        );
        Ok(RelayReceipt::ok())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
