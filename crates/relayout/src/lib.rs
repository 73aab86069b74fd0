//! Relayout - Incremental layout for nested diagrams.
//!
//! Given a diagram snapshot whose nodes may lack geometry, plus the moves and
//! resizes a user just made, Relayout computes a new snapshot: new nodes are
//! sized and placed, overlapping siblings are pushed apart, containers grow
//! around their children and edges touching anything that moved are
//! rerouted. Everything else keeps the geometry it already had.

pub mod config;
pub mod image_file;
pub mod layout;

mod error;

pub use relayout_core::{geometry, identifier, metrics, semantic};

pub use error::RelayoutError;
pub use layout::{LayoutReport, LayoutRequest};

use std::sync::OnceLock;

use log::{debug, info, trace};

use relayout_core::metrics::{FontTextMeasure, ImageMeasure, TextMeasure};

use config::AppConfig;
use image_file::FileImageMeasure;
use layout::{DiagramConverter, IncrementalLayoutEngine, LayoutedDiagramProvider};

static FONT_MEASURE: OnceLock<FontTextMeasure> = OnceLock::new();

/// Builder for running incremental layout over diagram snapshots.
///
/// Labels are measured with the system fonts and image sizes are read from
/// local files unless other measurers are supplied.
///
/// # Examples
///
/// ```rust,no_run
/// use relayout::{LayoutBuilder, LayoutRequest, config::AppConfig};
/// use relayout::geometry::Point;
/// use relayout::identifier::Id;
/// use relayout::semantic::{Diagram, Node, NodeStyle, OtherStyle};
///
/// let diagram = Diagram::new(Id::new("diagram"))
///     .with_nodes(vec![Node::new(Id::new("app"), NodeStyle::Other(OtherStyle::new("note")))]);
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let request = LayoutRequest::new().with_starting_position(Point::new(20.0, 70.0));
///
/// let laid_out = builder.layout(&diagram, &request)
///     .expect("Failed to lay out");
/// assert_eq!(laid_out.nodes()[0].position(), Point::new(20.0, 70.0));
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
    text_measure: Option<Box<dyn TextMeasure>>,
    image_measure: Option<Box<dyn ImageMeasure>>,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            text_measure: None,
            image_measure: None,
        }
    }

    /// Use `measure` to compute label text bounds.
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.text_measure = Some(Box::new(measure));
        self
    }

    /// Use `measure` to look up native image sizes.
    pub fn with_image_measure(mut self, measure: impl ImageMeasure + 'static) -> Self {
        self.image_measure = Some(Box::new(measure));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out `diagram` after applying the changes in `request`.
    ///
    /// # Errors
    ///
    /// Returns `RelayoutError` if the snapshot contains duplicate ids or the
    /// request carries unusable geometry.
    pub fn layout(
        &self,
        diagram: &semantic::Diagram,
        request: &LayoutRequest,
    ) -> Result<semantic::Diagram, RelayoutError> {
        self.layout_with_report(diagram, request)
            .map(|(diagram, _)| diagram)
    }

    /// Like [`LayoutBuilder::layout`], also returning what the run touched.
    ///
    /// # Errors
    ///
    /// Returns `RelayoutError` if the snapshot contains duplicate ids or the
    /// request carries unusable geometry.
    pub fn layout_with_report(
        &self,
        diagram: &semantic::Diagram,
        request: &LayoutRequest,
    ) -> Result<(semantic::Diagram, LayoutReport), RelayoutError> {
        info!(diagram_id = diagram.id().to_string(); "Laying out diagram");
        validate_request(request)?;

        let converter = DiagramConverter::new(self.text_measure());
        let converted = converter.convert(diagram)?;
        if !converted.unresolved_edges().is_empty() {
            debug!(count = converted.unresolved_edges().len(); "Skipped unresolved edges");
        }
        let (mut data, _) = converted.into_parts();

        let default_images = FileImageMeasure::new();
        let image_measure: &dyn ImageMeasure = match &self.image_measure {
            Some(measure) => measure.as_ref(),
            None => &default_images,
        };
        let engine = IncrementalLayoutEngine::new(self.config.layout(), image_measure);
        let report = engine.layout(&mut data, request);

        let output = LayoutedDiagramProvider.apply(diagram, &data);
        info!(
            nodes_changed = report.nodes_changed,
            edges_rerouted = report.edges_rerouted;
            "Layout completed",
        );
        trace!(output:?; "Laid out diagram");

        Ok((output, report))
    }

    fn text_measure(&self) -> &dyn TextMeasure {
        match &self.text_measure {
            Some(measure) => measure.as_ref(),
            None => FONT_MEASURE.get_or_init(FontTextMeasure::new),
        }
    }
}

fn validate_request(request: &LayoutRequest) -> Result<(), RelayoutError> {
    for (id, position) in request.moved() {
        if !position.x().is_finite() || !position.y().is_finite() {
            return Err(RelayoutError::Layout(format!(
                "requested position for `{id}` is not finite"
            )));
        }
    }
    for (id, size) in request.resized() {
        let (width, height) = (size.width(), size.height());
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(RelayoutError::Layout(format!(
                "requested size for `{id}` must be finite and non-negative"
            )));
        }
    }
    match request.starting_position() {
        Some(position) if !position.x().is_finite() || !position.y().is_finite() => Err(
            RelayoutError::Layout("starting position is not finite".to_string()),
        ),
        _ => Ok(()),
    }
}
