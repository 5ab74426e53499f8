//! Outbound email. One provider is picked at startup from the configured
//! credentials and shared behind the [`Mailer`] capability.

pub mod resend;
pub mod smtp;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::error::Result;

pub use resend::ResendMailer;
pub use smtp::{SmtpMailer, SmtpSettings};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}

/// Which provider the credentials ask for, before any connection is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Resend,
    Smtp,
    Disabled,
}

impl ProviderKind {
    /// Hosted API key wins, then SMTP user and password, otherwise nothing.
    pub fn choose(config: &EmailConfig) -> Self {
        if config.resend_api_key.is_some() {
            ProviderKind::Resend
        } else if config.smtp_user.is_some() && config.smtp_password.is_some() {
            ProviderKind::Smtp
        } else {
            ProviderKind::Disabled
        }
    }
}

pub enum EmailProvider {
    Resend(ResendMailer),
    Smtp(SmtpMailer),
    Disabled,
}

impl EmailProvider {
    /// Builds the provider selected by [`ProviderKind::choose`]. Construction
    /// or verification failures fall back to `Disabled` with a warning so the
    /// server still starts.
    pub async fn from_config(config: &EmailConfig) -> Self {
        match ProviderKind::choose(config) {
            ProviderKind::Resend => {
                let api_key = config.resend_api_key.clone().unwrap_or_default();
                match ResendMailer::new(api_key, config.from.clone()) {
                    Ok(mailer) => {
                        info!(from = %mailer.sender(), "Email provider: Resend API");
                        EmailProvider::Resend(mailer)
                    }
                    Err(e) => {
                        warn!(error = ?e, "Could not build Resend client, email disabled");
                        EmailProvider::Disabled
                    }
                }
            }
            ProviderKind::Smtp => {
                let user = config.smtp_user.clone().unwrap_or_default();
                let password = config.smtp_password.clone().unwrap_or_default();
                let sender = config.from.clone().unwrap_or_else(|| user.clone());
                let settings = SmtpSettings::infer(
                    &sender,
                    config.smtp_host.as_deref(),
                    config.smtp_port,
                    config.smtp_secure,
                );
                match SmtpMailer::connect(settings.clone(), user, password, &sender).await {
                    Ok(mailer) => {
                        info!(
                            host = %settings.host,
                            port = settings.port,
                            secure = settings.secure,
                            "Email provider: SMTP"
                        );
                        EmailProvider::Smtp(mailer)
                    }
                    Err(e) => {
                        warn!(
                            error = ?e,
                            host = %settings.host,
                            "SMTP verification failed, email disabled"
                        );
                        EmailProvider::Disabled
                    }
                }
            }
            ProviderKind::Disabled => {
                info!("No email credentials configured, email disabled");
                EmailProvider::Disabled
            }
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            EmailProvider::Resend(_) => ProviderKind::Resend,
            EmailProvider::Smtp(_) => ProviderKind::Smtp,
            EmailProvider::Disabled => ProviderKind::Disabled,
        }
    }
}

#[async_trait]
impl Mailer for EmailProvider {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        match self {
            EmailProvider::Resend(mailer) => mailer.send(to, subject, html).await,
            EmailProvider::Smtp(mailer) => mailer.send(to, subject, html).await,
            EmailProvider::Disabled => {
                debug!(to, subject, "Email disabled, skipping send");
                Ok(())
            }
        }
    }
}
