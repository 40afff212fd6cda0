//! Form state extraction and query-string serialization.
//!
//! A form is reduced to a [`FieldSet`]: an insertion-ordered map from control
//! name to a typed [`FieldValue`]. The set renders to a query string using the
//! same unreserved characters as `encodeURIComponent`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::ser::{Serialize, SerializeMap, Serializer};
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text, number inputs, textareas and selects.
    Text(String),
    /// Checkbox state.
    Flag(bool),
    /// Value of the checked option of a radio group.
    Choice(String),
}

impl FieldValue {
    /// String form used on the wire, or `None` when the value is blank.
    pub fn query_value(&self) -> Option<String> {
        let value = match self {
            Self::Text(text) | Self::Choice(text) => text.clone(),
            Self::Flag(flag) => flag.to_string(),
        };
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) | Self::Choice(text) => serializer.serialize_str(text),
            Self::Flag(flag) => serializer.serialize_bool(*flag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Checkbox,
    Radio,
    /// Buttons and other controls that never carry form state.
    Ignored,
}

impl ControlKind {
    /// Classifies a control from its tag name and `type` attribute.
    pub fn classify(tag: &str, input_type: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "input" => match input_type.to_ascii_lowercase().as_str() {
                "checkbox" => Self::Checkbox,
                "radio" => Self::Radio,
                "submit" | "button" | "reset" | "image" => Self::Ignored,
                _ => Self::Text,
            },
            "select" | "textarea" => Self::Text,
            _ => Self::Ignored,
        }
    }
}

/// Snapshot of one form control, independent of the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

impl Control {
    pub fn new(name: impl Into<String>, kind: ControlKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
            disabled: false,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn field_value(&self) -> Option<FieldValue> {
        if self.name.is_empty() || self.disabled {
            return None;
        }
        match self.kind {
            ControlKind::Text => Some(FieldValue::Text(self.value.clone())),
            ControlKind::Checkbox => Some(FieldValue::Flag(self.checked)),
            ControlKind::Radio if self.checked => Some(FieldValue::Choice(self.value.clone())),
            ControlKind::Radio | ControlKind::Ignored => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_controls<I>(controls: I) -> Self
    where
        I: IntoIterator<Item = Control>,
    {
        let mut fields = Self::new();
        for control in controls {
            if let Some(value) = control.field_value() {
                fields.insert(control.name, value);
            }
        }
        fields
    }

    /// Sets `name`, replacing an earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn to_query_string(&self) -> String {
        self.iter()
            .filter_map(|(key, value)| {
                value
                    .query_value()
                    .map(|value| format!("{}={}", encode_component(key), encode_component(&value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Appends `query` to `endpoint`, leaving the endpoint untouched when there is nothing to add.
pub fn stream_url(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_owned()
    } else if endpoint.contains('?') {
        format!("{endpoint}&{query}")
    } else {
        format!("{endpoint}?{query}")
    }
}

/// Reads the current state of every control in `form`.
pub fn read_form(form: &HtmlFormElement) -> FieldSet {
    let elements = form.elements();
    let controls = (0..elements.length())
        .filter_map(|index| elements.item(index))
        .filter_map(|element| {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                let kind = ControlKind::classify("input", &input.type_());
                Some(
                    Control::new(input.name(), kind, input.value())
                        .checked(input.checked())
                        .disabled(input.disabled()),
                )
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                Some(
                    Control::new(select.name(), ControlKind::Text, select.value())
                        .disabled(select.disabled()),
                )
            } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                Some(
                    Control::new(area.name(), ControlKind::Text, area.value())
                        .disabled(area.disabled()),
                )
            } else {
                None
            }
        });
    FieldSet::from_controls(controls)
}
