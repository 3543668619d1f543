use aws_sdk_sesv2::{
    error::{BuildError, SdkError},
    operation::send_email::SendEmailError,
    types::{Body, Content, Destination, EmailContent, Message},
    Client as SesClient,
};
use thiserror::Error;

mod notice;

pub use notice::Notice;

/// Outbound notification dispatch via SES.
///
/// One instance is constructed at ignite time and placed in managed state;
/// it owns the fixed sender address and the portal URL used in registration
/// notices.
pub struct Mailer {
    client: SesClient,
    sender: String,
    login_url: String,
}

#[derive(Debug, Error)]
enum SendError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Send(#[from] SdkError<SendEmailError>),
}

impl Mailer {
    pub fn new(client: SesClient, sender: String, login_url: String) -> Self {
        Self {
            client,
            sender,
            login_url,
        }
    }

    /// The portal URL included in registration notices.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Send `notice` to `to`.
    ///
    /// Transport failures never propagate: they are logged and reported as
    /// `false`, and the caller decides whether the batch carries on. No
    /// retries here.
    pub async fn send(&self, to: &str, notice: &Notice) -> bool {
        match self.try_send(to, notice).await {
            Ok(()) => {
                info!("Email sent to {to}");
                true
            }
            Err(err) => {
                warn!("Failed to send email to {to}: {err}");
                false
            }
        }
    }

    async fn try_send(&self, to: &str, notice: &Notice) -> Result<(), SendError> {
        let charset = "UTF-8";
        let message = Message::builder()
            .subject(
                Content::builder()
                    .data(notice.subject())
                    .charset(charset)
                    .build()?,
            )
            .body(
                Body::builder()
                    .text(
                        Content::builder()
                            .data(notice.text_body())
                            .charset(charset)
                            .build()?,
                    )
                    .html(
                        Content::builder()
                            .data(notice.html_body())
                            .charset(charset)
                            .build()?,
                    )
                    .build(),
            )
            .build();

        self.client
            .send_email()
            .from_email_address(&self.sender)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;
        Ok(())
    }
}
