//! The 2D drawing surface chromatograph plots are built on. Callers layer plot
//! elements in data coordinates; `render` maps them to screen space and hands the
//! resulting shapes to an egui painter.

use eframe::{
    egui::{pos2, vec2, Align2, Color32, FontFamily, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2},
    emath::{RectTransform, Rot2},
    epaint::{PathStroke, TextShape},
};
use tracing::trace;

/// Matches the upstream figure proportions (a wide, short strip).
pub const FIG_SIZE: Vec2 = Vec2::new(960., 360.);

// Margins around the plot area, for tick labels below and the legend to the right.
const PAD_LEFT: f32 = 10.;
const PAD_RIGHT: f32 = 76.;
const PAD_TOP: f32 = 10.;
const PAD_BOTTOM: f32 = 28.;

const TICK_LEN: f32 = 4.;
const FONT_SIZE_TICK: f32 = 12.;
const LEGEND_ROW_SPACING: f32 = 18.;
const LEGEND_SWATCH_LEN: f32 = 16.;

const COLOR_BACKGROUND: Color32 = Color32::WHITE;
const COLOR_AXIS: Color32 = Color32::from_rgb(60, 60, 60);
const COLOR_GRID: Color32 = Color32::from_rgb(220, 220, 220);

/// A single plot element, in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A polyline.
    Line {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
    },
    /// A fill between y=0 and a curve.
    Fill { points: Vec<Pos2>, color: Color32 },
    /// A text label. `rotation` is in degrees, counter-clockwise on screen.
    /// Rotated text is centered on `pos`; `anchor` applies to unrotated text only.
    Text {
        pos: Pos2,
        text: String,
        color: Color32,
        size: f32,
        bold: bool,
        monospace: bool,
        rotation: f32,
        anchor: Align2,
    },
    /// A borderless filled rectangle spanning two corners. The corners are stored
    /// as given; they are normalized at render time.
    Rect { a: Pos2, b: Pos2, fill: Color32 },
}

/// Which axes borders to draw.
#[derive(Clone, Copy, Debug)]
pub struct Spines {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Default for Spines {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }
}

/// An owned plot: view limits, ticks, legend, cosmetics, and a display list of
/// elements. Everything is held in data coordinates until `render`.
#[derive(Clone, Debug)]
pub struct Axes {
    size: Vec2,
    xlim: (f32, f32),
    ylim: (f32, f32),
    xticks: Vec<(f32, String)>,
    legend: Vec<(String, Color32)>,
    elements: Vec<Element>,
    pub spines: Spines,
    y_axis_visible: bool,
    grid: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(FIG_SIZE)
    }
}

impl Axes {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            xlim: (0., 1.),
            ylim: (0., 1.),
            xticks: Vec::new(),
            legend: Vec::new(),
            elements: Vec::new(),
            spines: Spines::default(),
            y_axis_visible: true,
            grid: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_xlim(&mut self, left: f32, right: f32) {
        self.xlim = (left, right);
    }

    pub fn xlim(&self) -> (f32, f32) {
        self.xlim
    }

    pub fn set_ylim(&mut self, bottom: f32, top: f32) {
        self.ylim = (bottom, top);
    }

    pub fn ylim(&self) -> (f32, f32) {
        self.ylim
    }

    pub fn set_xticks(&mut self, ticks: Vec<(f32, String)>) {
        self.xticks = ticks;
    }

    pub fn xticks(&self) -> &[(f32, String)] {
        &self.xticks
    }

    pub fn hide_y_axis(&mut self) {
        self.y_axis_visible = false;
    }

    pub fn set_grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn legend_entry(&mut self, label: impl Into<String>, color: Color32) {
        self.legend.push((label.into(), color));
    }

    pub fn legend(&self) -> &[(String, Color32)] {
        &self.legend
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn line(&mut self, x: &[f32], y: &[f32], color: Color32, width: f32) {
        let points = x.iter().zip(y).map(|(&x, &y)| pos2(x, y)).collect();
        self.elements.push(Element::Line { points, color, width });
    }

    pub fn fill_between(&mut self, x: &[f32], y: &[f32], color: Color32) {
        let points = x.iter().zip(y).map(|(&x, &y)| pos2(x, y)).collect();
        self.elements.push(Element::Fill { points, color });
    }

    pub fn rect(&mut self, a: Pos2, b: Pos2, fill: Color32) {
        self.elements.push(Element::Rect { a, b, fill });
    }

    /// Draw this plot into the UI, allocating a painter of the axes' fixed size.
    pub fn render(&self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(self.size, Sense::hover());
        let full = response.rect;
        let plot_rect = Rect::from_min_max(
            full.min + vec2(PAD_LEFT, PAD_TOP),
            full.max - vec2(PAD_RIGHT, PAD_BOTTOM),
        );

        let (x0, x1) = self.xlim;
        let (y0, y1) = self.ylim;
        // Note the flipped y range: data y grows upward, screen y downward.
        let to_screen = RectTransform::from_to(Rect::from_x_y_ranges(x0..=x1, y1..=y0), plot_rect);

        trace!(elements = self.elements.len(), "rendering axes");

        let mut shapes = vec![Shape::rect_filled(plot_rect, 0., COLOR_BACKGROUND)];

        if self.grid {
            for (x, _) in &self.xticks {
                let p = to_screen * pos2(*x, y1);
                shapes.push(Shape::line_segment(
                    [p, pos2(p.x, plot_rect.max.y)],
                    Stroke::new(1., COLOR_GRID),
                ));
            }
        }

        for element in &self.elements {
            match element {
                Element::Line { points, color, width } => {
                    let points = points.iter().map(|p| to_screen * *p).collect();
                    shapes.push(Shape::line(points, PathStroke::new(*width, *color)));
                }
                Element::Fill { points, color } => {
                    shapes.push(fill_to_baseline(points, *color, &to_screen));
                }
                Element::Text {
                    pos,
                    text,
                    color,
                    size,
                    bold,
                    monospace,
                    rotation,
                    anchor,
                } => {
                    let family = if *monospace {
                        // Monospace is important for sequences.
                        FontFamily::Monospace
                    } else {
                        FontFamily::Proportional
                    };
                    let font_id = FontId::new(*size, family);
                    let screen = to_screen * *pos;

                    if *rotation == 0. {
                        let shape = ui.ctx().fonts(|fonts| {
                            Shape::text(fonts, screen, *anchor, text, font_id.clone(), *color)
                        });
                        if *bold {
                            // The default egui font set carries no bold face; overstrike.
                            shapes.push(ui.ctx().fonts(|fonts| {
                                Shape::text(fonts, screen + vec2(0.4, 0.), *anchor, text, font_id, *color)
                            }));
                        }
                        shapes.push(shape);
                    } else {
                        let angle = -rotation.to_radians();
                        let galley = ui
                            .ctx()
                            .fonts(|fonts| fonts.layout_no_wrap(text.clone(), font_id, *color));
                        // Offset so the galley's center lands on `screen` after rotation.
                        let half = galley.size() * 0.5;
                        let text_pos = screen + Rot2::from_angle(angle) * -vec2(half.x, half.y);
                        if *bold {
                            let shape: Shape = TextShape::new(text_pos + vec2(0.4, 0.), galley.clone(), *color)
                                .with_angle(angle)
                                .into();
                            shapes.push(shape);
                        }
                        shapes.push(TextShape::new(text_pos, galley, *color).with_angle(angle).into());
                    }
                }
                Element::Rect { a, b, fill } => {
                    let rect = Rect::from_two_pos(to_screen * *a, to_screen * *b);
                    shapes.push(Shape::rect_filled(rect, 0., *fill));
                }
            }
        }

        let stroke = Stroke::new(1., COLOR_AXIS);
        if self.spines.left {
            shapes.push(Shape::line_segment(
                [plot_rect.left_top(), plot_rect.left_bottom()],
                stroke,
            ));
        }
        if self.spines.right {
            shapes.push(Shape::line_segment(
                [plot_rect.right_top(), plot_rect.right_bottom()],
                stroke,
            ));
        }
        if self.spines.top {
            shapes.push(Shape::line_segment(
                [plot_rect.left_top(), plot_rect.right_top()],
                stroke,
            ));
        }
        if self.spines.bottom {
            shapes.push(Shape::line_segment(
                [plot_rect.left_bottom(), plot_rect.right_bottom()],
                stroke,
            ));
        }

        for (x, label) in &self.xticks {
            let p = to_screen * pos2(*x, y0);
            shapes.push(Shape::line_segment(
                [p, pos2(p.x, p.y + TICK_LEN)],
                Stroke::new(1., COLOR_AXIS),
            ));
            shapes.push(ui.ctx().fonts(|fonts| {
                Shape::text(
                    fonts,
                    pos2(p.x, p.y + TICK_LEN + 2.),
                    Align2::CENTER_TOP,
                    label,
                    FontId::new(FONT_SIZE_TICK, FontFamily::Proportional),
                    COLOR_AXIS,
                )
            }));
        }

        if self.y_axis_visible {
            for y in [y0, y1] {
                let p = to_screen * pos2(x0, y);
                shapes.push(ui.ctx().fonts(|fonts| {
                    Shape::text(
                        fonts,
                        pos2(p.x - 2., p.y),
                        Align2::RIGHT_CENTER,
                        y,
                        FontId::new(FONT_SIZE_TICK, FontFamily::Proportional),
                        COLOR_AXIS,
                    )
                }));
            }
        }

        // Legend, anchored outside the plot area at its upper right.
        let mut y = plot_rect.min.y;
        for (label, color) in &self.legend {
            let x_start = plot_rect.max.x + 10.;
            shapes.push(Shape::line_segment(
                [pos2(x_start, y + 7.), pos2(x_start + LEGEND_SWATCH_LEN, y + 7.)],
                Stroke::new(2., *color),
            ));
            shapes.push(ui.ctx().fonts(|fonts| {
                Shape::text(
                    fonts,
                    pos2(x_start + LEGEND_SWATCH_LEN + 6., y),
                    Align2::LEFT_TOP,
                    label,
                    FontId::new(FONT_SIZE_TICK, FontFamily::Proportional),
                    COLOR_AXIS,
                )
            }));
            y += LEGEND_ROW_SPACING;
        }

        painter.extend(shapes);
    }
}

/// Triangle-strip mesh filling the area between a curve and y=0.
fn fill_to_baseline(points: &[Pos2], color: Color32, to_screen: &RectTransform) -> Shape {
    let mut mesh = Mesh::default();
    for (i, p) in points.iter().enumerate() {
        mesh.colored_vertex(*to_screen * *p, color);
        mesh.colored_vertex(*to_screen * pos2(p.x, 0.), color);
        if i > 0 {
            let i = 2 * i as u32;
            mesh.add_triangle(i - 2, i - 1, i);
            mesh.add_triangle(i - 1, i, i + 1);
        }
    }
    Shape::mesh(mesh)
}
