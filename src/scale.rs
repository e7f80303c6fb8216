use std::fmt;

// ---------------------------------------------------------------------------
// Scale – min/max based linear mapping
// ---------------------------------------------------------------------------

/// Direction in which values grow on a pixel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `origin + offset` (left → right).
    Forward,
    /// `origin - offset` (screen y grows downwards).
    Inverted,
}

/// An unclamped RGB triple. Channels stay outside `0..=255` when the value
/// lies outside the scale's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

/// The `(min, max)` of a sample set plus the mappings derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    /// Scan the samples for their extremes. Returns `None` for an empty set.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = samples.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Scale { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`, or `1.0` when every sample was equal.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    /// Position of `value` within the range (0 at `min`, 1 at `max`).
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Map a value onto a pixel axis starting at `origin` and spanning
    /// `extent` pixels.
    pub fn to_pixel(&self, value: f64, origin: f64, extent: f64, axis: Axis) -> f64 {
        let offset = self.normalize(value) * extent;
        match axis {
            Axis::Forward => origin + offset,
            Axis::Inverted => origin - offset,
        }
    }

    pub fn to_radius(&self, value: f64, min_radius: f64, max_radius: f64) -> f64 {
        min_radius + self.normalize(value) * (max_radius - min_radius)
    }

    /// Red at `min`, green at `max`, blue fixed at zero.
    pub fn to_color(&self, value: f64) -> Rgb {
        let t = self.normalize(value);
        Rgb {
            red: (255.0 * (1.0 - t)).round() as i32,
            green: (255.0 * t).round() as i32,
            blue: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_samples_have_no_scale() {
        assert!(Scale::from_samples(Vec::new()).is_none());
    }

    #[test]
    fn extremes_map_to_configured_pixels() {
        let s = Scale::from_samples([3.0, 10.0, 7.0, -2.0]).unwrap();
        assert_eq!((s.min(), s.max()), (-2.0, 10.0));
        assert_eq!(s.to_pixel(-2.0, 60.0, 720.0, Axis::Forward), 60.0);
        assert_eq!(s.to_pixel(10.0, 60.0, 720.0, Axis::Forward), 780.0);
        assert_eq!(s.to_pixel(-2.0, 360.0, 340.0, Axis::Inverted), 360.0);
        assert_eq!(s.to_pixel(10.0, 360.0, 340.0, Axis::Inverted), 20.0);
    }

    #[test]
    fn to_pixel_is_monotonic() {
        let s = Scale::from_samples([0.0, 100.0]).unwrap();
        let xs: Vec<f64> = (0..=100)
            .map(|v| s.to_pixel(v as f64, 0.0, 500.0, Axis::Forward))
            .collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        let ys: Vec<f64> = (0..=100)
            .map(|v| s.to_pixel(v as f64, 500.0, 500.0, Axis::Inverted))
            .collect();
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn single_sample_uses_unit_span() {
        let s = Scale::from_samples([42.0]).unwrap();
        assert_eq!(s.min(), s.max());
        assert_eq!(s.span(), 1.0);
        let px = s.to_pixel(42.0, 60.0, 720.0, Axis::Forward);
        assert!(px.is_finite());
        assert_eq!(px, 60.0);
        let r = s.to_radius(42.0, 5.0, 25.0);
        assert!(r.is_finite());
        assert_eq!(r, 5.0);
    }

    #[test]
    fn radius_spans_min_to_max() {
        let s = Scale::from_samples([1e5, 8e7]).unwrap();
        assert_eq!(s.to_radius(1e5, 5.0, 25.0), 5.0);
        assert_eq!(s.to_radius(8e7, 5.0, 25.0), 25.0);
    }

    #[test]
    fn color_goes_red_to_green() {
        let s = Scale::from_samples([10.0, 20.0]).unwrap();
        assert_eq!(s.to_color(10.0).to_string(), "rgb(255,0,0)");
        assert_eq!(s.to_color(20.0).to_string(), "rgb(0,255,0)");
        assert_eq!(
            s.to_color(15.0),
            Rgb {
                red: 128,
                green: 128,
                blue: 0
            }
        );
    }

    #[test]
    fn color_is_not_clamped() {
        let s = Scale::from_samples([0.0, 10.0]).unwrap();
        let c = s.to_color(20.0);
        assert_eq!(c.red, -255);
        assert_eq!(c.green, 510);
    }
}
