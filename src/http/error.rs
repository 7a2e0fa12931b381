use std::error::Error;

/// Any failure while issuing the request or reading its body.
///
/// Every transport problem (DNS, refused connection, TLS, truncated body)
/// collapses into this one kind; only its message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestFailure {
    message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Join an error and its sources with `: `, skipping causes the message
    /// already ends with.
    fn from_chain(err: &dyn Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.ends_with(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self::new(message)
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::from_chain(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_message_verbatim() {
        let failure = RequestFailure::new("Failed to fetch");
        assert_eq!(failure.to_string(), "Failed to fetch");
        assert_eq!(failure.message(), "Failed to fetch");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{text}")]
    struct Layer {
        text: String,
        #[source]
        inner: Option<Box<Layer>>,
    }

    fn layer(text: &str, inner: Option<Layer>) -> Layer {
        Layer {
            text: text.to_string(),
            inner: inner.map(Box::new),
        }
    }

    #[test]
    fn joins_each_cause_once() {
        let err = layer(
            "error sending request",
            Some(layer("tcp connect error", Some(layer("Connection refused (os error 111)", None)))),
        );
        let failure = RequestFailure::from_chain(&err);
        assert_eq!(
            failure.message(),
            "error sending request: tcp connect error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn skips_cause_already_in_message() {
        let err = layer(
            "connection closed: Connection reset by peer",
            Some(layer("Connection reset by peer", None)),
        );
        let failure = RequestFailure::from_chain(&err);
        assert_eq!(failure.message(), "connection closed: Connection reset by peer");
        assert_eq!(failure.message().matches("Connection reset by peer").count(), 1);
    }
}
