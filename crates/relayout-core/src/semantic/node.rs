//! Nodes and their styles.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::{Error as _, SerializeMap},
};
use serde_json::{Map, Value};

use crate::{
    geometry::{Point, Size},
    identifier::Id,
    semantic::Label,
};

/// The closed set of node categories the layout policies distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rectangle,
    Image,
    Other,
}

/// Style of a rectangular node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectangleStyle {
    color: String,
    border_color: String,
    border_size: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            border_color: "#000000".to_string(),
            border_size: 1,
            extra: Map::new(),
        }
    }
}

impl RectangleStyle {
    pub fn new(color: impl Into<String>, border_color: impl Into<String>, border_size: u32) -> Self {
        Self {
            color: color.into(),
            border_color: border_color.into(),
            border_size,
            extra: Map::new(),
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    pub fn border_size(&self) -> u32 {
        self.border_size
    }

    /// Style fields layout does not interpret, kept for the output snapshot.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Style of an image node.
///
/// A `scaling_factor` of `0` or less means "use the image's native size".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    image_url: String,
    #[serde(default = "ImageStyle::native_scaling")]
    scaling_factor: i32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ImageStyle {
    pub fn new(image_url: impl Into<String>, scaling_factor: i32) -> Self {
        Self {
            image_url: image_url.into(),
            scaling_factor,
            extra: Map::new(),
        }
    }

    fn native_scaling() -> i32 {
        -1
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn scaling_factor(&self) -> i32 {
        self.scaling_factor
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Style of a node kind layout has no specific policy for.
///
/// The kind and every field are kept as given so the style is written back
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherStyle {
    kind: String,
    fields: Map<String, Value>,
}

impl OtherStyle {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Visual style of a node. Only consulted by layout to pick default sizes.
///
/// Serialized as an object tagged by `kind`. Kinds other than `rectangle`
/// and `image` become [`NodeStyle::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeStyle {
    Rectangle(RectangleStyle),
    Image(ImageStyle),
    Other(OtherStyle),
}

impl NodeStyle {
    const RECTANGLE: &'static str = "rectangle";
    const IMAGE: &'static str = "image";

    /// Returns the category used by the size and label policies.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Rectangle(_) => NodeKind::Rectangle,
            Self::Image(_) => NodeKind::Image,
            Self::Other(_) => NodeKind::Other,
        }
    }
}

impl Serialize for NodeStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (kind, body) = match self {
            Self::Rectangle(style) => (Self::RECTANGLE, serde_json::to_value(style)),
            Self::Image(style) => (Self::IMAGE, serde_json::to_value(style)),
            Self::Other(style) => (style.kind(), Ok(Value::Object(style.fields.clone()))),
        };
        let Value::Object(fields) = body.map_err(S::Error::custom)? else {
            return Err(S::Error::custom("node style must serialize to an object"));
        };

        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry("kind", kind)?;
        for (key, value) in &fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match fields.remove("kind") {
            Some(Value::String(kind)) => kind,
            Some(_) => return Err(D::Error::custom("node style `kind` must be a string")),
            None => return Err(D::Error::missing_field("kind")),
        };

        match kind.as_str() {
            Self::RECTANGLE => serde_json::from_value(Value::Object(fields))
                .map(Self::Rectangle)
                .map_err(D::Error::custom),
            Self::IMAGE => serde_json::from_value(Value::Object(fields))
                .map(Self::Image)
                .map_err(D::Error::custom),
            _ => Ok(Self::Other(OtherStyle { kind, fields })),
        }
    }
}

/// A node of the diagram snapshot.
///
/// Border nodes sit on the node's outline; child nodes are laid out inside
/// it. Both are positioned relative to this node's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: Id,
    style: NodeStyle,
    #[serde(default = "super::unset_point")]
    position: Point,
    #[serde(default = "super::unset_size")]
    size: Size,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    border_nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    child_nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
}

impl Node {
    /// Creates a node that has never been laid out.
    pub fn new(id: Id, style: NodeStyle) -> Self {
        Self {
            id,
            style,
            position: Point::UNSET,
            size: Size::UNSET,
            border_nodes: Vec::new(),
            child_nodes: Vec::new(),
            label: None,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_border_nodes(mut self, border_nodes: Vec<Node>) -> Self {
        self.border_nodes = border_nodes;
        self
    }

    pub fn with_child_nodes(mut self, child_nodes: Vec<Node>) -> Self {
        self.child_nodes = child_nodes;
        self
    }

    pub fn with_label(mut self, label: Option<Label>) -> Self {
        self.label = label;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn kind(&self) -> NodeKind {
        self.style.kind()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn border_nodes(&self) -> &[Node] {
        &self.border_nodes
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.child_nodes
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}
