//! Image operations used by the target pipeline.
//!
//! [`VisionOps`] is the seam between the pipeline and the code that touches
//! pixels. [`SoftwareVision`] implements it on the CPU; tests substitute
//! implementations that fail at a chosen step.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::vision::{
    VisionError,
    hsv::HsvThreshold,
    image::{BinaryMask, ColorImage},
};

/// The three image operations of the pipeline. Each returns a new buffer
/// registered with the ledger of its input.
pub trait VisionOps {
    /// Histogram-equalizes every color plane.
    fn equalize(&mut self, image: &ColorImage) -> Result<ColorImage, VisionError>;

    /// Marks each pixel whose HSV value lies inside `threshold`.
    fn threshold_hsv(
        &mut self,
        image: &ColorImage,
        threshold: &HsvThreshold,
    ) -> Result<BinaryMask, VisionError>;

    /// Fills the smallest convex region containing every marked pixel.
    fn convex_hull(&mut self, mask: &BinaryMask) -> Result<BinaryMask, VisionError>;
}

/// CPU implementation of [`VisionOps`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareVision;

impl VisionOps for SoftwareVision {
    fn equalize(&mut self, image: &ColorImage) -> Result<ColorImage, VisionError> {
        let pixels = image.pixels();
        if pixels.is_empty() {
            return Err(VisionError::Processing("cannot equalize an empty image".into()));
        }

        let red = equalization_table(pixels.iter().map(|p| p.r()));
        let green = equalization_table(pixels.iter().map(|p| p.g()));
        let blue = equalization_table(pixels.iter().map(|p| p.b()));

        let equalized = pixels
            .iter()
            .map(|p| {
                Rgb888::new(
                    red[p.r() as usize],
                    green[p.g() as usize],
                    blue[p.b() as usize],
                )
            })
            .collect();
        image.derive(equalized)
    }

    fn threshold_hsv(
        &mut self,
        image: &ColorImage,
        threshold: &HsvThreshold,
    ) -> Result<BinaryMask, VisionError> {
        if image.pixels().is_empty() {
            return Err(VisionError::Processing("cannot threshold an empty image".into()));
        }
        let bits = image.pixels().iter().map(|&p| threshold.accepts(p)).collect();
        BinaryMask::from_bits(&image.ledger(), image.width(), image.height(), bits)
    }

    fn convex_hull(&mut self, mask: &BinaryMask) -> Result<BinaryMask, VisionError> {
        if mask.bits().is_empty() {
            return Err(VisionError::Processing("cannot take the hull of an empty mask".into()));
        }

        let points = mask.points().map(|(x, y)| (x as i64, y as i64)).collect();
        let hull = convex_hull(points);
        let mut bits = vec![false; mask.bits().len()];

        if let Some(bounds) = Bounds::of(&hull) {
            let width = mask.width() as i64;
            for y in bounds.min_y..=bounds.max_y {
                for x in bounds.min_x..=bounds.max_x {
                    if inside_convex(&hull, (x, y)) {
                        bits[(y * width + x) as usize] = true;
                    }
                }
            }
        }

        BinaryMask::from_bits(&mask.ledger(), mask.width(), mask.height(), bits)
    }
}

/// Maps each 8-bit level to its equalized level.
fn equalization_table(values: impl Iterator<Item = u8>) -> [u8; 256] {
    let mut histogram = [0usize; 256];
    for value in values {
        histogram[value as usize] += 1;
    }
    let total: usize = histogram.iter().sum();
    let cdf_min = histogram.iter().copied().find(|&count| count > 0).unwrap_or(0);

    let mut table = [0u8; 256];
    if total == cdf_min {
        // A single level: nothing to spread.
        for (level, entry) in table.iter_mut().enumerate() {
            *entry = level as u8;
        }
        return table;
    }

    let span = total - cdf_min;
    let mut cdf = 0usize;
    for (level, entry) in table.iter_mut().enumerate() {
        cdf += histogram[level];
        let scaled = (cdf.saturating_sub(cdf_min) * 255 + span / 2) / span;
        *entry = scaled.min(255) as u8;
    }
    table
}

type Point = (i64, i64);

fn cross(o: Point, a: Point, b: Point) -> i64 { (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0) }

/// Monotone-chain hull. Returns the vertices in counter-clockwise order
/// without collinear points; fewer than three vertices for degenerate input.
pub(crate) fn convex_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_unstable();
    points.dedup();
    if points.len() <= 2 {
        return points;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Whether `p` lies inside or on the boundary of the hull.
fn inside_convex(hull: &[Point], p: Point) -> bool {
    match hull.len() {
        0 => false,
        1 => hull[0] == p,
        n => (0..n).all(|i| cross(hull[i], hull[(i + 1) % n], p) >= 0),
    }
}

struct Bounds {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl Bounds {
    fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.0,
            max_x: first.0,
            min_y: first.1,
            max_y: first.1,
        };
        for &(x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }
}
