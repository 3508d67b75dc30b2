//! Tool system: gesture interpreters and the manager that routes events to them.

pub mod base;
mod polygon;
mod select;
mod session;
mod shape;

pub use polygon::PolygonTool;
pub use select::SelectTool;
pub use session::InteractionSession;
pub use shape::ShapeTool;

use crate::canvas::Canvas;
use crate::config::{ConfigError, ToolConfig};
use crate::input::{EventFlags, ToolEvent};
use crate::shapes::RectKind;
use crate::view::View;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which tool receives the next button-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DrawShape {
    #[default]
    Selection,
    Line,
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Polygon,
}

impl DrawShape {
    pub const COUNT: usize = 6;

    /// Every variant, in registry order.
    pub const ALL: [DrawShape; Self::COUNT] = [
        DrawShape::Selection,
        DrawShape::Line,
        DrawShape::Rectangle,
        DrawShape::RoundedRectangle,
        DrawShape::Ellipse,
        DrawShape::Polygon,
    ];

    /// Position in [`DrawShape::ALL`].
    pub fn index(self) -> usize {
        match self {
            DrawShape::Selection => 0,
            DrawShape::Line => 1,
            DrawShape::Rectangle => 2,
            DrawShape::RoundedRectangle => 3,
            DrawShape::Ellipse => 4,
            DrawShape::Polygon => 5,
        }
    }

    /// The rectangle-family object this selector draws, if any.
    pub fn rect_kind(self) -> Option<RectKind> {
        match self {
            DrawShape::Line => Some(RectKind::Line),
            DrawShape::Rectangle => Some(RectKind::Rectangle),
            DrawShape::RoundedRectangle => Some(RectKind::RoundedRectangle),
            DrawShape::Ellipse => Some(RectKind::Ellipse),
            DrawShape::Selection | DrawShape::Polygon => None,
        }
    }
}

/// How the current drag is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectMode {
    #[default]
    None,
    /// Rubber-band selection.
    NetSelect,
    Move,
    /// Dragging a single handle.
    Resize,
}

/// Everything a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub canvas: &'a mut Canvas,
    pub view: &'a mut dyn View,
    pub session: &'a mut InteractionSession,
    pub config: &'a ToolConfig,
}

/// A gesture interpreter. Points are in client coordinates.
///
/// Tools hold no gesture state of their own; everything lives in the
/// [`InteractionSession`] so one tool can hand a gesture over to another.
pub trait Tool: std::fmt::Debug {
    /// The selector this tool is registered under.
    fn draw_shape(&self) -> DrawShape;

    fn on_button_down(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point);

    fn on_button_up(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point);

    fn on_mouse_move(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point);

    fn on_double_click(&self, _cx: &mut ToolContext<'_>, _flags: EventFlags, _point: Point) {}

    fn on_edit_properties(&self, _cx: &mut ToolContext<'_>) {}

    fn on_cancel(&self, cx: &mut ToolContext<'_>) {
        base::cancel(cx);
    }

    /// Snap pass run after every mouse move.
    fn snap(&self, cx: &mut ToolContext<'_>) {
        base::snap(cx);
    }
}

/// Owns the tools, the gesture session and the configuration, and routes
/// view events to the tool picked by the current selector.
#[derive(Debug)]
pub struct ToolManager {
    tools: [Box<dyn Tool>; DrawShape::COUNT],
    session: InteractionSession,
    config: ToolConfig,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Create a tool manager with the default configuration.
    pub fn new() -> Self {
        Self::build(ToolConfig::default())
    }

    /// Create a tool manager with a custom configuration, rejecting invalid radii.
    pub fn with_config(config: ToolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ToolConfig) -> Self {
        let tools: [Box<dyn Tool>; DrawShape::COUNT] = [
            Box::new(SelectTool),
            Box::new(ShapeTool::new(DrawShape::Line)),
            Box::new(ShapeTool::new(DrawShape::Rectangle)),
            Box::new(ShapeTool::new(DrawShape::RoundedRectangle)),
            Box::new(ShapeTool::new(DrawShape::Ellipse)),
            Box::new(PolygonTool),
        ];
        debug_assert!(
            tools
                .iter()
                .zip(DrawShape::ALL)
                .all(|(tool, shape)| tool.draw_shape() == shape),
            "tool registry out of order"
        );
        Self {
            tools,
            session: InteractionSession::new(),
            config,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn draw_shape(&self) -> DrawShape {
        self.session.draw_shape
    }

    /// Pick the tool for the next gesture.
    pub fn set_draw_shape(&mut self, shape: DrawShape) {
        if self.session.draw_shape != shape {
            log::debug!("Tool changed: {:?} -> {:?}", self.session.draw_shape, shape);
        }
        self.session.draw_shape = shape;
        self.session.mode = SelectMode::None;
    }

    /// The tool registered for a selector.
    pub fn tool(&self, shape: DrawShape) -> &dyn Tool {
        self.tools[shape.index()].as_ref()
    }

    fn dispatch(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        f: impl FnOnce(&dyn Tool, &mut ToolContext<'_>),
    ) {
        let tool = self.tools[self.session.draw_shape.index()].as_ref();
        let mut cx = ToolContext {
            canvas,
            view,
            session: &mut self.session,
            config: &self.config,
        };
        f(tool, &mut cx);
    }

    pub fn button_down(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        flags: EventFlags,
        point: Point,
    ) {
        self.dispatch(canvas, view, |tool, cx| tool.on_button_down(cx, flags, point));
    }

    pub fn button_up(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        flags: EventFlags,
        point: Point,
    ) {
        self.dispatch(canvas, view, |tool, cx| tool.on_button_up(cx, flags, point));
    }

    /// Route a move to the current tool, then run its snap pass.
    pub fn mouse_move(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        flags: EventFlags,
        point: Point,
    ) {
        log::trace!("Mouse move at {point:?}");
        self.dispatch(canvas, view, |tool, cx| {
            tool.on_mouse_move(cx, flags, point);
            tool.snap(cx);
        });
    }

    pub fn double_click(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        flags: EventFlags,
        point: Point,
    ) {
        self.dispatch(canvas, view, |tool, cx| tool.on_double_click(cx, flags, point));
    }

    pub fn cancel(&mut self, canvas: &mut Canvas, view: &mut dyn View) {
        log::debug!("Cancel in {:?} mode", self.session.mode);
        self.dispatch(canvas, view, |tool, cx| tool.on_cancel(cx));
    }

    pub fn edit_properties(&mut self, canvas: &mut Canvas, view: &mut dyn View) {
        self.dispatch(canvas, view, |tool, cx| tool.on_edit_properties(cx));
    }

    /// Route one event.
    pub fn handle_event(&mut self, canvas: &mut Canvas, view: &mut dyn View, event: ToolEvent) {
        match event {
            ToolEvent::ButtonDown { position, flags } => {
                self.button_down(canvas, view, flags, position)
            }
            ToolEvent::ButtonUp { position, flags } => self.button_up(canvas, view, flags, position),
            ToolEvent::MouseMove { position, flags } => {
                self.mouse_move(canvas, view, flags, position)
            }
            ToolEvent::DoubleClick { position, flags } => {
                self.double_click(canvas, view, flags, position)
            }
            ToolEvent::Cancel => self.cancel(canvas, view),
            ToolEvent::EditProperties => self.edit_properties(canvas, view),
        }
    }

    /// Route a sequence of events in order.
    pub fn replay(
        &mut self,
        canvas: &mut Canvas,
        view: &mut dyn View,
        events: impl IntoIterator<Item = ToolEvent>,
    ) {
        for event in events {
            self.handle_event(canvas, view, event);
        }
    }
}
