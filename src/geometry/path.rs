use super::{Point, midpoint};

/// A single drawing instruction of a smoothed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    /// Quadratic Bezier from the current position through `control` to `end`.
    QuadTo { control: Point, end: Point },
}

/// An open path made of one `MoveTo` followed by quadratic segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothPath {
    commands: Vec<PathCommand>,
}

impl SmoothPath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of quadratic segments.
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCommand::QuadTo { .. }))
            .count()
    }

    /// Approximates the path by a polyline for hosts that can only draw
    /// straight segments. Each quadratic is split into `segments_per_curve`
    /// pieces.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Point> {
        let steps = segments_per_curve.max(1);
        let mut out = Vec::with_capacity(1 + self.segment_count() * steps);
        let mut cursor = Point::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    out.push(p);
                    cursor = p;
                }
                PathCommand::QuadTo { control, end } => {
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        out.push(quad_point(cursor, control, end, t));
                    }
                    cursor = end;
                }
            }
        }
        out
    }
}

fn quad_point(start: Point, control: Point, end: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * start.x + 2.0 * u * t * control.x + t * t * end.x,
        u * u * start.y + 2.0 * u * t * control.y + t * t * end.y,
    )
}

/// Builds the smoothed path used for freehand and polygon strokes.
///
/// Fewer than two points produce an empty path. Otherwise the path moves to
/// the first point and adds one quadratic per following point, with the
/// control point halfway between the previous raw point and the current one.
pub fn quadratic_smooth_path(points: &[Point]) -> SmoothPath {
    let Some((&first, rest)) = points.split_first() else {
        return SmoothPath::default();
    };
    if rest.is_empty() {
        return SmoothPath::default();
    }

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(first));
    let mut prev = first;
    for &point in rest {
        commands.push(PathCommand::QuadTo {
            control: midpoint(prev, point),
            end: point,
        });
        prev = point;
    }
    SmoothPath { commands }
}
