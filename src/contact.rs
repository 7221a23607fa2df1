use std::collections::BTreeMap;
use std::future::Future;

pub const SUCCESS_MESSAGE: &str = "Thanks! Your message was sent (demo).";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    // Nothing produces this until a real delivery backend replaces `deliver_demo`.
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

/// Field values pulled out of the contact form. A repeated field name keeps
/// its last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: BTreeMap<String, String>,
}

impl FormPayload {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

impl SubmissionStatus {
    pub fn from_result(result: &Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Self::Sent,
            Err(_) => Self::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Sending)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Idle | Self::Sending => "",
            Self::Sent => SUCCESS_MESSAGE,
            Self::Failed => FAILURE_MESSAGE,
        }
    }

    /// The form fields are cleared only after a successful send.
    pub fn resets_form(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Stand-in for a real delivery backend: waits on `delay` and reports
/// success. The payload is only inspected for logging.
pub async fn deliver_demo<D>(payload: &FormPayload, delay: D) -> Result<(), SubmitError>
where
    D: Future<Output = ()>,
{
    log::info!("contact form submitted fields={}", payload.len());
    delay.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    impl FormPayload {
        fn get(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    #[test]
    fn duplicate_fields_keep_last_value() {
        let payload = FormPayload::from_entries([
            ("name", "Ada"),
            ("topic", "hello"),
            ("topic", "hiring"),
        ]);

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("topic"), Some("hiring"));
        assert_eq!(payload.get("email"), None);
    }

    #[test]
    fn status_messages_follow_outcome() {
        assert_eq!(SubmissionStatus::Idle.message(), "");
        assert!(SubmissionStatus::Sending.is_loading());
        assert_eq!(SubmissionStatus::Sending.message(), "");

        let sent = SubmissionStatus::from_result(&Ok(()));
        assert_eq!(sent.message(), SUCCESS_MESSAGE);
        assert!(!sent.is_loading());
        assert!(sent.resets_form());

        let failed = SubmissionStatus::from_result(&Err(SubmitError::Delivery("offline".into())));
        assert_eq!(failed.message(), FAILURE_MESSAGE);
        assert!(!failed.is_loading());
        assert!(!failed.resets_form());
    }

    #[tokio::test]
    async fn demo_delivery_succeeds_after_delay() {
        let payload = FormPayload::from_entries([("email", "ada@example.com")]);
        let mut waited = false;

        let result = deliver_demo(&payload, async {
            waited = true;
        })
        .await;

        assert!(result.is_ok());
        assert!(waited);
        assert_eq!(SubmissionStatus::from_result(&result), SubmissionStatus::Sent);
    }

    #[tokio::test]
    async fn empty_form_still_reports_success() {
        let result = deliver_demo(&FormPayload::default(), std::future::ready(())).await;
        assert_eq!(SubmissionStatus::from_result(&result).message(), SUCCESS_MESSAGE);
    }
}
