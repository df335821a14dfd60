//! Running 2D bounding rectangle for plan extents

use kurbo::{Point, Rect};
use shared::Point2D;

/// Axis-aligned bounds of a set of plan points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    rect: Rect,
}

impl Bounds2D {
    pub fn from_point(p: Point2D) -> Self {
        let pt = Point::new(p.x, p.y);
        Self {
            rect: Rect::from_points(pt, pt),
        }
    }

    pub fn min(&self) -> Point2D {
        Point2D::new(self.rect.x0, self.rect.y0)
    }

    pub fn max(&self) -> Point2D {
        Point2D::new(self.rect.x1, self.rect.y1)
    }

    /// Extent along plan X
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Extent along plan Y (world Z)
    pub fn depth(&self) -> f64 {
        self.rect.height()
    }

    pub fn center(&self) -> Point2D {
        let c = self.rect.center();
        Point2D::new(c.x, c.y)
    }

    fn include(&self, p: Point2D) -> Self {
        Self {
            rect: self.rect.union_pt(Point::new(p.x, p.y)),
        }
    }
}

/// Fold `points` into `running`. Non-finite points are skipped, so the
/// result is `running` unchanged when no valid point is supplied.
pub fn bounds_2d<I>(points: I, running: Option<Bounds2D>) -> Option<Bounds2D>
where
    I: IntoIterator<Item = Point2D>,
{
    points
        .into_iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .fold(running, |acc, p| match acc {
            Some(bounds) => Some(bounds.include(p)),
            None => Some(Bounds2D::from_point(p)),
        })
}
