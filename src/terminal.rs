//! Line-numbered terminal output.
//!
//! [`LineSink`] is the renderer contract: lines are numbered from 1 in the
//! order they are appended, and [`LineSink::clear`] resets numbering.
//! [`Terminal`] renders into a DOM element; [`Transcript`] keeps lines in memory.

use std::fmt;

use web_sys::{Document, Element, HtmlElement};

use crate::error::{HubError, Result};

pub trait LineSink {
    fn clear(&mut self);

    /// Appends `text` and returns the number it was assigned.
    fn append_line(&mut self, text: &str) -> Result<usize>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub number: usize,
    pub text: String,
}

impl TerminalLine {
    pub fn label(&self) -> String {
        format!("{}:", self.number)
    }
}

impl fmt::Display for TerminalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number, self.text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<TerminalLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    /// Lines as they read on screen, e.g. `3: hello`.
    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl LineSink for Transcript {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn append_line(&mut self, text: &str) -> Result<usize> {
        let number = self.lines.len() + 1;
        self.lines.push(TerminalLine {
            number,
            text: text.to_owned(),
        });
        Ok(number)
    }
}

/// A terminal region backed by a DOM element.
#[derive(Debug, Clone)]
pub struct Terminal {
    element: HtmlElement,
}

impl Terminal {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn from_id(document: &Document, id: &str) -> Result<Self> {
        crate::dom::element_by_id::<HtmlElement>(document, id, "html element").map(Self::new)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn line_count(&self) -> usize {
        self.element.child_element_count() as usize
    }

    fn span(document: &Document, class: &str, text: &str) -> Result<Element> {
        let span = document.create_element("span").map_err(HubError::dom)?;
        span.set_class_name(class);
        // Stream data is untrusted; it must land as a text node.
        span.set_text_content(Some(text));
        Ok(span)
    }
}

impl LineSink for Terminal {
    fn clear(&mut self) {
        self.element.set_text_content(None);
    }

    fn append_line(&mut self, text: &str) -> Result<usize> {
        let document = self.element.owner_document().ok_or(HubError::NoDocument)?;
        let line = TerminalLine {
            number: self.line_count() + 1,
            text: text.to_owned(),
        };

        let row = document.create_element("div").map_err(HubError::dom)?;
        row.set_class_name("line");
        let number = Self::span(&document, "line-no", &line.label())?;
        let content = Self::span(&document, "line-content", &line.text)?;
        row.append_child(&number).map_err(HubError::dom)?;
        row.append_child(&content).map_err(HubError::dom)?;
        self.element.append_child(&row).map_err(HubError::dom)?;

        self.element.set_scroll_top(self.element.scroll_height());
        Ok(line.number)
    }
}
