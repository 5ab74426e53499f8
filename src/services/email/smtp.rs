use std::time::Duration;

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::error::{Error, Result};

/// Where and how to reach the SMTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS from the first byte (port 465 style). When false the
    /// connection is upgraded with STARTTLS.
    pub secure: bool,
}

impl SmtpSettings {
    /// Derives the server from the sender's domain. Explicit host, port and
    /// TLS mode override whatever the domain suggests; an overridden port
    /// without a TLS flag implies implicit TLS only on 465.
    pub fn infer(
        sender: &str,
        host: Option<&str>,
        port: Option<u16>,
        secure: Option<bool>,
    ) -> Self {
        let domain = sender_domain(sender);
        let (known_host, known_port, known_secure) = match domain.as_str() {
            "gmail.com" | "googlemail.com" => ("smtp.gmail.com".to_string(), 465, true),
            "outlook.com" | "hotmail.com" | "live.com" | "msn.com" => {
                ("smtp-mail.outlook.com".to_string(), 587, false)
            }
            "office365.com" => ("smtp.office365.com".to_string(), 587, false),
            "yahoo.com" | "yahoo.es" | "ymail.com" => ("smtp.mail.yahoo.com".to_string(), 465, true),
            "icloud.com" | "me.com" | "mac.com" => ("smtp.mail.me.com".to_string(), 587, false),
            "zoho.com" => ("smtp.zoho.com".to_string(), 465, true),
            other => (format!("smtp.{}", other), 587, false),
        };

        let port = port.unwrap_or(known_port);
        let secure = match (secure, port == known_port) {
            (Some(flag), _) => flag,
            (None, true) => known_secure,
            (None, false) => port == 465,
        };

        Self {
            host: host.map(str::to_string).unwrap_or(known_host),
            port,
            secure,
        }
    }
}

fn sender_domain(sender: &str) -> String {
    sender
        .trim()
        .trim_end_matches('>')
        .rsplit('@')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport and verifies the server accepts a connection.
    pub async fn connect(
        settings: SmtpSettings,
        user: String,
        password: String,
        sender: &str,
    ) -> Result<Self> {
        let from: Mailbox = sender.parse()?;

        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(user, password))
            .timeout(Some(Duration::from_secs(15)))
            .build();

        if !transport.test_connection().await? {
            return Err(Error::Email(format!(
                "SMTP server {}:{} rejected the connection",
                settings.host, settings.port
            )));
        }

        Ok(Self { transport, from })
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())?;

        self.transport.send(message).await?;
        info!(to, subject, "Email sent via SMTP");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmail_uses_implicit_tls() {
        let s = SmtpSettings::infer("rh@gmail.com", None, None, None);
        assert_eq!(
            s,
            SmtpSettings {
                host: "smtp.gmail.com".into(),
                port: 465,
                secure: true
            }
        );
    }

    #[test]
    fn outlook_family_uses_starttls() {
        for sender in ["a@outlook.com", "a@Hotmail.com", "a@live.com"] {
            let s = SmtpSettings::infer(sender, None, None, None);
            assert_eq!(s.host, "smtp-mail.outlook.com");
            assert_eq!(s.port, 587);
            assert!(!s.secure);
        }
    }

    #[test]
    fn unknown_domain_falls_back_to_smtp_subdomain() {
        let s = SmtpSettings::infer("Citas <citas@empresa.mx>", None, None, None);
        assert_eq!(s.host, "smtp.empresa.mx");
        assert_eq!(s.port, 587);
        assert!(!s.secure);
    }

    #[test]
    fn explicit_values_override_inference() {
        let s = SmtpSettings::infer("rh@gmail.com", Some("mail.local"), Some(2525), Some(false));
        assert_eq!(s.host, "mail.local");
        assert_eq!(s.port, 2525);
        assert!(!s.secure);
    }

    #[test]
    fn overridden_port_implies_tls_mode() {
        let s = SmtpSettings::infer("rh@empresa.com", None, Some(465), None);
        assert!(s.secure);
        let s = SmtpSettings::infer("rh@gmail.com", None, Some(587), None);
        assert!(!s.secure);
    }
}
