//! Task catalog for the script hub page.
//!
//! A page may embed its own catalog as JSON in
//! `<script type="application/json" id="script-hub-config">`; otherwise
//! [`HubConfig::default`] describes the stock conversion tasks.

use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::Result;

pub const CONFIG_ELEMENT_ID: &str = "script-hub-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub title: String,
    pub tasks: Vec<TaskSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub title: String,
    pub endpoint: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl TaskSpec {
    pub fn form_id(&self) -> String {
        format!("{}-form", self.id)
    }

    pub fn terminal_id(&self) -> String {
        format!("{}-terminal", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            label: None,
            kind,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        default: String,
        #[serde(default)]
        placeholder: String,
    },
    Number {
        #[serde(default)]
        default: Option<i64>,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
    },
    Select {
        options: Vec<String>,
        #[serde(default)]
        default: Option<String>,
    },
    Radio {
        options: Vec<String>,
        #[serde(default)]
        default: Option<String>,
    },
}

fn text(placeholder: &str) -> FieldKind {
    FieldKind::Text {
        default: String::new(),
        placeholder: placeholder.to_owned(),
    }
}

fn number(default: Option<i64>) -> FieldKind {
    FieldKind::Number { default }
}

impl Default for HubConfig {
    fn default() -> Self {
        let resolution = |default| {
            ["resolution_x", "resolution_y", "resolution_z"]
                .into_iter()
                .map(move |name| FieldSpec::new(name, number(default)))
        };

        let simple_image = TaskSpec {
            id: "convert-simple-image".into(),
            title: "Convert image".into(),
            endpoint: "/api/convert-simple-image".into(),
            fields: [
                FieldSpec::new("image_path", text("/path/to/image.tif")),
                FieldSpec::new("output_directory", text("/path/to/output")),
            ]
            .into_iter()
            .chain(resolution(None))
            .chain([
                FieldSpec::new("resume", FieldKind::Checkbox { checked: false }),
                FieldSpec::new("write_block_size", number(Some(1024))),
            ])
            .collect(),
        };

        let labeled_image = TaskSpec {
            id: "convert-labeled-image".into(),
            title: "Convert labeled image".into(),
            endpoint: "/api/convert-labeled-image".into(),
            fields: [
                FieldSpec::new("image", text("/path/to/labels.tif")),
                FieldSpec::new("output_directory", text("/path/to/output")),
            ]
            .into_iter()
            .chain(resolution(Some(1)))
            .chain([
                FieldSpec::new("width", number(None)),
                FieldSpec::new("height", number(None)),
            ])
            .collect(),
        };

        let annotation = TaskSpec {
            id: "convert-annotation".into(),
            title: "Convert annotation".into(),
            endpoint: "/api/convert-annotation".into(),
            fields: vec![
                FieldSpec::new(
                    "annotation_type",
                    FieldKind::Select {
                        options: ["atlas-ellipsoid", "box", "ellipsoid", "line", "sphere", "point"]
                            .map(String::from)
                            .to_vec(),
                        default: Some("point".into()),
                    },
                ),
                FieldSpec::new("output_directory", text("/path/to/output")),
                FieldSpec::new("resolution", text("x,y,z")),
                FieldSpec::new("lower_bound", text("x,y,z")),
                FieldSpec::new("upper_bound", text("x,y,z")),
                FieldSpec::new("generate_index", FieldKind::Checkbox { checked: true }),
            ],
        };

        Self {
            title: "Script Hub".into(),
            tasks: vec![simple_image, labeled_image, annotation],
        }
    }
}

impl HubConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the embedded catalog from `document`, falling back to the default.
    pub fn from_document(document: &Document) -> Result<Self> {
        let embedded = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .filter(|json| !json.trim().is_empty());
        match embedded {
            Some(json) => {
                let config = Self::from_json(&json)?;
                log::info!("loaded {} task(s) from #{CONFIG_ELEMENT_ID}", config.tasks.len());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
