use crate::domain::repository::Mailer;
use crate::error::DirectoryError;

/// JSON mail-API client: one POST per message, bearer-token auth.
///
/// Send failures map to `DeliveryFailure` so callers can distinguish "the
/// passcode was stored but not delivered" from every other outcome.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_token: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_token,
            from,
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), DirectoryError> {
        let payload = serde_json::json!({
            "from": self.from,
            "to": recipient,
            "subject": subject,
            "html": html_body,
        });
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await;
        match response {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => {
                tracing::error!(status = %resp.status(), "mail API rejected send");
                Err(DirectoryError::DeliveryFailure)
            }
            Err(e) => {
                tracing::error!(error = %e, "mail API unreachable");
                Err(DirectoryError::DeliveryFailure)
            }
        }
    }
}
