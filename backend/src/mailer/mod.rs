//! Outbound email notifications
//!
//! Reset and confirmation links are delivered out of band: the engine
//! submits a [`Notification`] to an in-process queue and moves on. A
//! spawned dispatch worker drains the queue and performs the SMTP sends,
//! logging failures. Delivery success is never part of the correctness
//! of the state transition that requested it, and no store lock is held
//! across a send.

use crate::config::EmailConfig;
use crate::error::{ApiError, ApiResult};
use lettre::{
    message::{header::ContentType, Message},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Upper bound on a single SMTP send before the worker gives up on it
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// A queued outbound notification
#[derive(Debug)]
pub enum Notification {
    PasswordResetLink { email: String, token: String },
    ConfirmationLink { email: String, token: String },
}

/// Handle for submitting notifications to the dispatch worker
///
/// Submission is non-blocking and infallible from the caller's point of
/// view; a closed queue (shutdown in progress) is logged and dropped.
#[derive(Clone)]
pub struct NotificationSender {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationSender {
    pub fn request_password_reset_link(&self, email: &str, token: &str) {
        self.submit(Notification::PasswordResetLink {
            email: email.to_string(),
            token: token.to_string(),
        });
    }

    pub fn request_confirmation_link(&self, email: &str, token: &str) {
        self.submit(Notification::ConfirmationLink {
            email: email.to_string(),
            token: token.to_string(),
        });
    }

    fn submit(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            warn!("Notification queue closed; dropping outbound notification");
        }
    }
}

/// Email mailer service over SMTP
#[derive(Clone)]
pub struct Mailer {
    config: Option<EmailConfig>,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    /// Create a new mailer
    ///
    /// With no email configuration every send is logged and skipped, so
    /// development setups work without an SMTP server.
    pub fn new(config: Option<EmailConfig>) -> ApiResult<Self> {
        let transport = if let Some(ref email_config) = config {
            let creds = Credentials::new(
                email_config.username.clone(),
                email_config.password.clone(),
            );

            let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&email_config.smtp_host)
                .map_err(|e| {
                    ApiError::Internal(anyhow::anyhow!("SMTP transport setup failed: {}", e))
                })?
                .port(email_config.smtp_port)
                .credentials(creds)
                .build();

            Some(transport)
        } else {
            None
        };

        Ok(Self { config, transport })
    }

    /// Send a password reset link
    pub async fn send_password_reset_link(&self, to_email: &str, token: &str) -> ApiResult<()> {
        let Some(config) = self.config.as_ref() else {
            warn!(
                "Email not configured, skipping password reset email to {}",
                to_email
            );
            return Ok(());
        };

        let reset_url = format!("{}/reset-password/{}", config.public_base_url, token);

        let body = format!(
            r#"
Hello,

We received a request to reset the password for your account.

To choose a new password, click the link below:

{}

This link expires in 1 hour and can only be used once.

If you did not request a password reset, you can ignore this email and
your password will remain unchanged.
"#,
            reset_url
        );

        self.send_email(to_email, "Reset your password", &body).await
    }

    /// Send an email confirmation link
    pub async fn send_confirmation_link(&self, to_email: &str, token: &str) -> ApiResult<()> {
        let Some(config) = self.config.as_ref() else {
            warn!(
                "Email not configured, skipping confirmation email to {}",
                to_email
            );
            return Ok(());
        };

        let confirmation_url = format!("{}/auth/confirm-email/{}", config.public_base_url, token);

        let body = format!(
            r#"
Hello,

Please confirm your email address by clicking the link below:

{}

If you did not register, you can ignore this email.
"#,
            confirmation_url
        );

        self.send_email(to_email, "Confirm your email address", &body)
            .await
    }

    /// Send a generic plain-text email
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> ApiResult<()> {
        let (Some(config), Some(transport)) = (self.config.as_ref(), self.transport.as_ref())
        else {
            warn!("Email transport not configured, cannot send email");
            return Ok(());
        };

        let email = Message::builder()
            .from(config.from_address.parse().map_err(|e| {
                ApiError::NotificationDelivery(format!("Invalid from address: {}", e))
            })?)
            .to(to.parse().map_err(|e| {
                ApiError::NotificationDelivery(format!("Invalid to address: {}", e))
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| ApiError::NotificationDelivery(format!("Failed to build email: {}", e)))?;

        transport
            .send(email)
            .await
            .map_err(|e| ApiError::NotificationDelivery(format!("Failed to send email: {}", e)))?;

        info!("Sent email to {}: {}", to, subject);
        Ok(())
    }

    /// Check if email is configured
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

/// Spawn the notification dispatch worker
///
/// Returns the submission handle and the worker's join handle. The
/// worker drains the queue until every sender is dropped; each send gets
/// its own timeout, and failures are logged, never propagated.
pub fn spawn_dispatcher(mailer: Mailer) -> (NotificationSender, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            let (email, send): (
                &String,
                std::pin::Pin<Box<dyn std::future::Future<Output = ApiResult<()>> + Send + '_>>,
            ) = match &notification {
                Notification::PasswordResetLink { email, token } => {
                    (email, Box::pin(mailer.send_password_reset_link(email, token)))
                }
                Notification::ConfirmationLink { email, token } => {
                    (email, Box::pin(mailer.send_confirmation_link(email, token)))
                }
            };

            match tokio::time::timeout(SEND_TIMEOUT, send).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Failed to deliver notification to {}: {}", email, e),
                Err(_) => warn!("Notification send to {} timed out", email),
            }
        }
    });

    (NotificationSender { tx }, handle)
}
