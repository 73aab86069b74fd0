//! Labels attached to nodes and edges.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    geometry::{Point, Size},
    identifier::Id,
};

/// Text styling a label is measured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelStyle {
    font_size: u16,
    bold: bool,
    italic: bool,
    color: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 14,
            bold: false,
            italic: false,
            color: "#000000".to_string(),
            extra: Map::new(),
        }
    }
}

impl LabelStyle {
    /// Creates a regular-weight label style with the given font size.
    pub fn new(font_size: u16) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Fields text measurement does not use, kept for the output snapshot.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// A text label owned by a node or an edge.
///
/// `position` is relative to the owning node's top-left corner, or absolute
/// for edge labels. `size` and `alignment` are the bounds stored by the
/// previous layout; all three are unset for a label that was never laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    id: Id,
    text: String,
    #[serde(default)]
    style: LabelStyle,
    #[serde(default = "super::unset_point")]
    position: Point,
    #[serde(default = "super::unset_point")]
    alignment: Point,
    #[serde(default = "super::unset_size")]
    size: Size,
}

impl Label {
    /// Creates a label that has never been laid out.
    pub fn new(id: Id, text: impl Into<String>, style: LabelStyle) -> Self {
        Self {
            id,
            text: text.into(),
            style,
            position: Point::UNSET,
            alignment: Point::UNSET,
            size: Size::UNSET,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_alignment(mut self, alignment: Point) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn alignment(&self) -> Point {
        self.alignment
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_label_is_unset() {
        let label = Label::new(Id::new("label-1"), "Entity", LabelStyle::new(16));

        assert_eq!(label.text(), "Entity");
        assert_eq!(label.style().font_size(), 16);
        assert!(label.position().is_unset());
        assert!(label.alignment().is_unset());
        assert!(label.size().is_unset());
    }

    #[test]
    fn test_deserialize_missing_bounds() {
        let label: Label = serde_json::from_str(r#"{"id":"l","text":"Hi"}"#).unwrap();

        assert_eq!(label.style(), &LabelStyle::default());
        assert!(label.position().is_unset());
        assert!(label.size().is_unset());
    }

    #[test]
    fn test_style_keeps_unmodelled_fields() {
        let input = serde_json::json!({
            "fontSize": 12,
            "bold": true,
            "italic": false,
            "color": "#333333",
            "underline": true
        });

        let style: LabelStyle = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(style.font_size(), 12);
        assert_eq!(style.extra().get("underline"), Some(&Value::Bool(true)));

        assert_eq!(serde_json::to_value(&style).unwrap(), input);
    }
}
