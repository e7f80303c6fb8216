use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui};

use crate::color::country_color;
use crate::data::query::{bubble_points, BubblePoint};
use crate::scale::{Axis, Scale};
use crate::state::AppState;

const PAD_LEFT: f32 = 60.0;
const PAD_RIGHT: f32 = 20.0;
const PAD_TOP: f32 = 20.0;
const PAD_BOTTOM: f32 = 40.0;

const MIN_RADIUS: f64 = 5.0;
const MAX_RADIUS: f64 = 25.0;

const OUTLINE: Color32 = Color32::from_rgb(0, 0, 128);

/// Screen placement of one bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBubble {
    pub point: BubblePoint,
    pub center: Pos2,
    pub radius: f32,
}

/// Lay out bubbles inside `rect`: x from GDP, y (inverted) from life
/// expectancy, radius from population. Empty input yields no bubbles.
pub fn layout(points: &[BubblePoint], rect: egui::Rect) -> Vec<PlacedBubble> {
    let (Some(gdp), Some(life), Some(pop)) = (
        Scale::from_samples(points.iter().map(|b| b.gdp)),
        Scale::from_samples(points.iter().map(|b| b.life)),
        Scale::from_samples(points.iter().map(|b| b.pop)),
    ) else {
        return Vec::new();
    };

    let x0 = (rect.left() + PAD_LEFT) as f64;
    let y0 = (rect.bottom() - PAD_BOTTOM) as f64;
    let width = (rect.width() - PAD_LEFT - PAD_RIGHT) as f64;
    let height = (rect.height() - PAD_TOP - PAD_BOTTOM) as f64;

    points
        .iter()
        .map(|&point| PlacedBubble {
            point,
            center: Pos2::new(
                gdp.to_pixel(point.gdp, x0, width, Axis::Forward) as f32,
                life.to_pixel(point.life, y0, height, Axis::Inverted) as f32,
            ),
            radius: pop.to_radius(point.pop, MIN_RADIUS, MAX_RADIUS) as f32,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bubble chart for the selected year
// ---------------------------------------------------------------------------

pub fn bubble_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let size = egui::vec2(ui.available_width(), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let fg = state.theme.text_color();
    let axis_stroke = Stroke::new(1.0, fg);

    // Axes
    let origin = Pos2::new(rect.left() + PAD_LEFT, rect.bottom() - PAD_BOTTOM);
    painter.line_segment(
        [origin, Pos2::new(rect.right() - PAD_RIGHT, origin.y)],
        axis_stroke,
    );
    painter.line_segment(
        [Pos2::new(origin.x, rect.top() + PAD_TOP), origin],
        axis_stroke,
    );
    painter.text(
        Pos2::new(rect.center().x, rect.bottom() - 5.0),
        Align2::CENTER_BOTTOM,
        "GDP per capita",
        FontId::proportional(12.0),
        fg,
    );
    painter.text(
        Pos2::new(rect.left() + 5.0, rect.top() + 5.0),
        Align2::LEFT_TOP,
        "Life expectancy",
        FontId::proportional(12.0),
        fg,
    );

    let (Some(dataset), Some(year)) = (&state.dataset, state.year) else {
        return;
    };

    painter.text(
        Pos2::new(rect.right() - PAD_RIGHT, rect.top() + 5.0),
        Align2::RIGHT_TOP,
        year.to_string(),
        FontId::proportional(20.0),
        fg.gamma_multiply(0.5),
    );

    let placed = layout(&bubble_points(dataset, year), rect);
    let hover = response.hover_pos();
    let mut hovered = None;

    for b in &placed {
        painter.circle(
            b.center,
            b.radius,
            country_color(b.point.country).gamma_multiply(0.85),
            Stroke::new(1.0, OUTLINE),
        );
        painter.text(
            Pos2::new(b.center.x, b.center.y - b.radius - 2.0),
            Align2::CENTER_BOTTOM,
            b.point.country.code(),
            FontId::proportional(10.0),
            fg,
        );
        if hover.is_some_and(|p| p.distance(b.center) <= b.radius) {
            hovered = Some(b.point);
        }
    }

    if let Some(p) = hovered {
        response.on_hover_text(format!(
            "{} - {year}\nGDP/capita: {}\nLife exp.: {}\nPop: {}",
            p.country, p.gdp, p.life, p.pop
        ));
    }
}
