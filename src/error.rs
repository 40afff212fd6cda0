use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element `{id}` not found")]
    MissingElement { id: String },
    #[error("element `{id}` is not a {expected}")]
    UnexpectedElement { id: String, expected: &'static str },
    #[error("failed to open event stream at `{url}`: {message}")]
    EventSource { url: String, message: String },
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("invalid hub configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl HubError {
    pub(crate) fn dom(value: JsValue) -> Self {
        Self::Dom(describe(&value))
    }

    pub(crate) fn event_source(url: &str, value: JsValue) -> Self {
        Self::EventSource {
            url: url.to_owned(),
            message: describe(&value),
        }
    }
}

impl From<HubError> for JsValue {
    fn from(err: HubError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_element() {
        let err = HubError::UnexpectedElement {
            id: "convert-form".into(),
            expected: "form",
        };
        assert_eq!(err.to_string(), "element `convert-form` is not a form");

        let err = HubError::MissingElement { id: "log".into() };
        assert_eq!(err.to_string(), "element `log` not found");
    }

    #[test]
    fn config_errors_convert_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HubError = parse.into();
        assert!(matches!(err, HubError::Config(_)));
    }
}
