use serde::{Deserialize, Serialize};

pub const DEFAULT_POLYGON_SIDES: u32 = 5;

/// The tool that decides what kind of stroke a drag produces.
///
/// `None` means drags pan and zoom the view instead of drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawMode {
    None,
    #[default]
    FreeHand,
    Circle,
    Rectangle,
    /// Regular polygon. The engine does not validate `sides`; hosts should
    /// only offer values of 3 or more. Zero yields an empty polygon.
    Polygon { sides: u32 },
}

impl DrawMode {
    pub fn polygon() -> Self {
        Self::Polygon {
            sides: DEFAULT_POLYGON_SIDES,
        }
    }

    pub fn is_drawing(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::FreeHand => "FreeHand",
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
            Self::Polygon { .. } => "Polygon",
        }
    }
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polygon { sides } => write!(f, "Polygon({sides})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_default_sides() {
        assert_eq!(DrawMode::polygon(), DrawMode::Polygon { sides: 5 });
        assert_eq!(DrawMode::polygon().to_string(), "Polygon(5)");
    }

    #[test]
    fn test_none_is_not_drawing() {
        assert!(!DrawMode::None.is_drawing());
        assert!(DrawMode::Circle.is_drawing());
        assert!(DrawMode::default().is_drawing());
    }
}
