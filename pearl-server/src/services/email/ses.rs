//! AWS SESv2 transport

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use super::{EmailError, EmailTransport};

/// SES-backed email transport
///
/// Credentials resolve through the SDK's default provider chain,
/// constructed explicitly at startup; the provider owns caching and
/// refresh.
#[derive(Clone, Debug)]
pub struct SesTransport {
    client: SesClient,
}

impl SesTransport {
    /// Build from the ambient AWS environment, with an optional region override
    pub async fn from_env(region: Option<&str>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let client = match region {
            Some(ses_region) => {
                let ses_config = aws_config
                    .to_builder()
                    .region(aws_config::Region::new(ses_region.to_string()))
                    .build();
                SesClient::new(&ses_config)
            }
            None => SesClient::new(&aws_config),
        };

        Self { client }
    }
}

#[async_trait]
impl EmailTransport for SesTransport {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let subject = Content::builder()
            .data(subject)
            .build()
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let body = Body::builder()
            .html(
                Content::builder()
                    .data(html)
                    .build()
                    .map_err(|e| EmailError::Build(e.to_string()))?,
            )
            .build();

        let message = Message::builder().subject(subject).body(body).build();

        self.client
            .send_email()
            .from_email_address(from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| EmailError::Send(e.to_string()))?;

        Ok(())
    }
}
