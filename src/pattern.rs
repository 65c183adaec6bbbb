use crate::tuple::Tuple3D;
use crate::color::Color;

/// How a surface is colored.
///
/// Patterns are evaluated in world space and are pure functions of the
/// surface point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pattern {
    /// The same color everywhere.
    Solid(Color),

    /// A checkerboard on the XZ plane with square cells of side `size`.
    ///
    /// Cells are indexed by truncating `x / size` and `z / size` toward zero,
    /// so the two cells touching each axis share an index and the cells
    /// around the origin are twice as wide as the rest.
    Checker {
        primary: Color,
        secondary: Color,
        size: f64,
    },
}

impl Default for Pattern {
    fn default() -> Pattern {
        Pattern::Solid(Color::white())
    }
}

impl Pattern {
    pub fn checker(primary: Color, secondary: Color, size: f64) -> Pattern {
        Pattern::Checker { primary, secondary, size }
    }

    pub fn color_at(&self, p: Tuple3D) -> Color {
        match *self {
            Pattern::Solid(c) => c,
            Pattern::Checker { primary, secondary, size } => {
                let ix = (p.x / size) as i64;
                let iz = (p.z / size) as i64;

                // Same parity means the sum is even; the sum itself can
                // overflow for far-off points.
                if ix.rem_euclid(2) == iz.rem_euclid(2) {
                    primary
                } else {
                    secondary
                }
            }
        }
    }
}

#[test]
fn solid_pattern_is_constant() {
    let pattern = Pattern::Solid(Color::rgb(0.1, 0.2, 0.3));

    assert_eq!(pattern.color_at(Tuple3D::new(0.0, 0.0, 0.0)),
        Color::rgb(0.1, 0.2, 0.3));
    assert_eq!(pattern.color_at(Tuple3D::new(-40.0, 7.0, 1e6)),
        Color::rgb(0.1, 0.2, 0.3));
}

#[test]
fn checker_pattern_alternates_along_x_and_z() {
    let pattern = Pattern::checker(Color::white(), Color::black(), 1.0);

    assert_eq!(pattern.color_at(Tuple3D::new(0.5, 0.0, 0.5)), Color::white());
    assert_eq!(pattern.color_at(Tuple3D::new(1.5, 0.0, 0.5)), Color::black());
    assert_eq!(pattern.color_at(Tuple3D::new(0.5, 0.0, 1.5)), Color::black());
    assert_eq!(pattern.color_at(Tuple3D::new(1.5, 0.0, 1.5)), Color::white());
    assert_eq!(pattern.color_at(Tuple3D::new(2.5, 0.0, 0.5)), Color::white());
}

#[test]
fn checker_pattern_ignores_y() {
    let pattern = Pattern::checker(Color::white(), Color::black(), 1.0);

    assert_eq!(pattern.color_at(Tuple3D::new(1.5, 0.0, 0.5)),
        pattern.color_at(Tuple3D::new(1.5, 100.0, 0.5)));
}

#[test]
fn checker_pattern_truncates_toward_zero() {
    let pattern = Pattern::checker(Color::white(), Color::black(), 1.0);

    // -0.5 and 0.5 both truncate to cell 0.
    assert_eq!(pattern.color_at(Tuple3D::new(-0.5, 0.0, 0.5)), Color::white());
    assert_eq!(pattern.color_at(Tuple3D::new(-1.5, 0.0, 0.5)), Color::black());
    assert_eq!(pattern.color_at(Tuple3D::new(-1.5, 0.0, -1.5)), Color::white());
}

#[test]
fn checker_pattern_respects_cell_size() {
    let pattern = Pattern::checker(Color::white(), Color::black(), 100.0);

    assert_eq!(pattern.color_at(Tuple3D::new(99.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.color_at(Tuple3D::new(101.0, 0.0, 0.0)), Color::black());
}

#[test]
fn checker_pattern_is_defined_far_from_origin() {
    let pattern = Pattern::checker(Color::white(), Color::black(), 1.0);

    // Both indices saturate to the same value, so the parities agree.
    assert_eq!(pattern.color_at(Tuple3D::new(1e300, 0.0, 1e300)), Color::white());
    assert_eq!(pattern.color_at(Tuple3D::new(-1e300, 0.0, 1e300)), Color::black());
    assert_eq!(pattern.color_at(Tuple3D::new(1e300, 0.0, 0.5)), Color::black());
}
