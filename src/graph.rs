use crate::app::Message;
use iced::{
    alignment,
    widget::canvas::{self, Frame, Path, Stroke, Text},
    Color, Point, Rectangle, Size,
};

pub const X_MIN: f64 = 0.0;
pub const X_MAX: f64 = 10.0;
pub const Y_MIN: f64 = -2.0;
pub const Y_MAX: f64 = 2.0;
const STEP: f64 = 0.1;
const SAMPLES: usize = 100;

const LEFT_MARGIN: f32 = 40.0;
const RIGHT_MARGIN: f32 = 15.0;
const TOP_MARGIN: f32 = 30.0;
const BOTTOM_MARGIN: f32 = 25.0;

/// Decorative sine animation. The phase is the raw last temperature and is
/// deliberately not fitted to the y range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SineGraph {
    pub phase: f64,
    pub frame: u64,
}

impl SineGraph {
    pub fn restart(&mut self, phase: f64) {
        self.phase = phase;
        self.frame = 0;
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Samples `sin(x + phase)` for x in [0, 10) at 0.1 steps.
    pub fn curve(&self) -> Vec<(f64, f64)> {
        (0..SAMPLES)
            .map(|i| {
                let x = i as f64 * STEP;
                (x, (x + self.phase).sin())
            })
            .collect()
    }
}

fn plot_area(size: Size) -> Rectangle {
    Rectangle {
        x: LEFT_MARGIN,
        y: TOP_MARGIN,
        width: (size.width - LEFT_MARGIN - RIGHT_MARGIN).max(1.0),
        height: (size.height - TOP_MARGIN - BOTTOM_MARGIN).max(1.0),
    }
}

/// Maps data coordinates into the plot rectangle.
pub fn to_screen(area: Rectangle, x: f64, y: f64) -> Point {
    let px = area.x + ((x - X_MIN) / (X_MAX - X_MIN)) as f32 * area.width;
    let py = area.y + (1.0 - ((y - Y_MIN) / (Y_MAX - Y_MIN)) as f32) * area.height;
    Point::new(px, py)
}

impl canvas::Program<Message> for SineGraph {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let area = plot_area(bounds.size());
        let axis_color = Color::from_rgb(0.2, 0.2, 0.2);

        frame.stroke(
            &Path::rectangle(Point::new(area.x, area.y), area.size()),
            Stroke::default().with_width(1.0).with_color(axis_color),
        );

        frame.fill_text(Text {
            content: "Temperature Fluctuation".to_string(),
            position: Point::new(bounds.width / 2.0, TOP_MARGIN / 2.0),
            color: Color::BLACK,
            size: 14.0.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });

        // Tick labels
        for tick in (0..=10).step_by(2) {
            let position = to_screen(area, tick as f64, Y_MIN);
            frame.fill_text(Text {
                content: tick.to_string(),
                position: Point::new(position.x, position.y + 4.0),
                color: axis_color,
                size: 10.0.into(),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Top,
                ..Text::default()
            });
        }
        for tick in -2..=2 {
            let position = to_screen(area, X_MIN, tick as f64);
            frame.fill_text(Text {
                content: format!("{:.1}", tick as f64),
                position: Point::new(position.x - 4.0, position.y),
                color: axis_color,
                size: 10.0.into(),
                horizontal_alignment: alignment::Horizontal::Right,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            });
        }

        let points: Vec<Point> = self
            .curve()
            .into_iter()
            .map(|(x, y)| to_screen(area, x, y))
            .collect();

        let line = Path::new(|builder| {
            if let Some((first, rest)) = points.split_first() {
                builder.move_to(*first);
                for point in rest {
                    builder.line_to(*point);
                }
            }
        });
        frame.stroke(
            &line,
            Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb(0.0, 0.0, 1.0)),
        );

        vec![frame.into_geometry()]
    }
}
