use std::{collections::BTreeMap, sync::Arc};

use tracing::instrument;
use validator::Validate;

use crate::{
    entities::contact_me::{ContactMeForm, ContactMeResponse, HireRequestForm, SubscribeForm},
    errors::AppError,
    repositories::relay::{MessageRelay, OutboundMessage},
};

const CONTACT_SENT: &str = "Message sent successfully! I'll get back to you soon.";
const HIRE_SENT: &str = "Thank you! I will contact you soon.";
const SUBSCRIBED: &str = "Thank you for subscribing!";

/// Relay template routing for the two real outbound forms.
#[derive(Debug, Clone, Default)]
pub struct RelayTemplates {
    pub contact_service_id: String,
    pub hire_service_id: String,
    pub template_id: String,
}

/// Validates the public forms and hands them to the message relay. A
/// failed delivery is reported once and dropped.
pub struct ContactMeHandler {
    relay: Arc<dyn MessageRelay>,
    newsletter: Arc<dyn MessageRelay>,
    templates: RelayTemplates,
}

impl ContactMeHandler {
    pub fn new(
        relay: Arc<dyn MessageRelay>,
        newsletter: Arc<dyn MessageRelay>,
        templates: RelayTemplates,
    ) -> Self {
        ContactMeHandler { relay, newsletter, templates }
    }

    pub fn relay_name(&self) -> &'static str {
        self.relay.name()
    }

    #[instrument(skip(self, form))]
    pub async fn submit_contact(&self, form: ContactMeForm) -> Result<ContactMeResponse, AppError> {
        form.validate()?;

        let message = OutboundMessage {
            service_id: self.templates.contact_service_id.clone(),
            template_id: self.templates.template_id.clone(),
            template_params: form.template_params(),
        };
        let receipt = self.relay.send(&message).await?;
        tracing::info!(status = receipt.status, "Contact message relayed");

        Ok(ContactMeResponse { message: CONTACT_SENT.to_string() })
    }

    #[instrument(skip(self, form))]
    pub async fn submit_hire_request(&self, form: HireRequestForm) -> Result<ContactMeResponse, AppError> {
        form.validate()?;

        let message = OutboundMessage {
            service_id: self.templates.hire_service_id.clone(),
            template_id: self.templates.template_id.clone(),
            template_params: form.template_params(),
        };
        self.relay.send(&message).await?;
        tracing::info!("Hire request relayed");

        Ok(ContactMeResponse { message: HIRE_SENT.to_string() })
    }

    /// Newsletter signup. There is no list behind it; the request only
    /// goes through the simulated relay.
    pub async fn subscribe(&self, form: SubscribeForm) -> Result<ContactMeResponse, AppError> {
        form.validate()?;

        let message = OutboundMessage {
            service_id: self.newsletter.name().to_string(),
            template_id: "blog_subscribe".to_string(),
            template_params: BTreeMap::from([("email".to_string(), form.email.trim().to_string())]),
        };
        self.newsletter.send(&message).await?;

        Ok(ContactMeResponse { message: SUBSCRIBED.to_string() })
    }
}
