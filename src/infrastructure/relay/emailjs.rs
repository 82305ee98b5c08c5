use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::{
    errors::RelayError,
    repositories::relay::{MessageRelay, OutboundMessage, RelayReceipt},
    settings::AppConfig,
};

const SEND_PATH: &str = "/api/v1.0/email/send";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a BTreeMap<String, String>,
}

/// Sends templated messages through the EmailJS REST API.
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    public_key: String,
    private_key: Option<Zeroizing<String>>,
}

impl EmailJsRelay {
    pub fn new(config: &AppConfig) -> Result<Self, RelayError> {
        if config.emailjs_public_key.trim().is_empty() {
            return Err(RelayError::NotConfigured("missing EmailJS public key".to_string()));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(EmailJsRelay {
            client,
            endpoint: format!("{}{}", config.emailjs_api_url.trim_end_matches('/'), SEND_PATH),
            public_key: config.emailjs_public_key.clone(),
            private_key: config.private_key(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, message: &'a OutboundMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &message.service_id,
            template_id: &message.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_ref().map(|key| key.as_str()),
            template_params: &message.template_params,
        }
    }
}

#[async_trait]
impl MessageRelay for EmailJsRelay {
    #[instrument(skip(self, message), fields(service_id = %message.service_id))]
    async fn send(&self, message: &OutboundMessage) -> Result<RelayReceipt, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(message))
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if status != 200 {
            return Err(RelayError::Rejected { status, body: text });
        }

        debug!(status, "EmailJS accepted message");
        Ok(RelayReceipt { status, text })
    }

    fn name(&self) -> &'static str {
        "emailjs"
    }
}
