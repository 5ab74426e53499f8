use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const DEFAULT_SENDER: &str = "onboarding@resend.dev";

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Hosted transactional email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key,
            from: from.unwrap_or_else(|| DEFAULT_SENDER.to_string()),
        })
    }

    pub fn sender(&self) -> &str {
        &self.from
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let body = ResendEmail {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let resp = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Email(format!(
                "Resend responded with {}: {}",
                status, text
            )));
        }

        info!(to, subject, "Email sent via Resend");
        Ok(())
    }
}
