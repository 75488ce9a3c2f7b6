//! Numeric scaling helpers shared by the encoders

/// Bubble radius bounds (px)
pub(crate) const BUBBLE_MIN_RADIUS: f64 = 5.0;
pub(crate) const BUBBLE_MAX_RADIUS: f64 = 15.0;
const BUBBLE_RADIUS_FACTOR: f64 = 1.5;

/// Word cloud font size bounds (px)
pub(crate) const CLOUD_MIN_FONT: f64 = 14.0;
pub(crate) const CLOUD_MAX_FONT: f64 = 40.0;

/// Fraction of the heat-map maximum that already saturates the gradient
const HEAT_SATURATION: f64 = 0.7;

/// Clamp into `[min, max]`; NaN maps to `min`
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Radius grows with the square root of total traffic, bounded on both ends
pub(crate) fn bubble_radius(sent: u64, received: u64) -> f64 {
    let total = sent as f64 + received as f64;
    clamp(
        total.sqrt() * BUBBLE_RADIUS_FACTOR,
        BUBBLE_MIN_RADIUS,
        BUBBLE_MAX_RADIUS,
    )
}

/// `weight / max` in `[0, 1]`; zero when there is no usable maximum
pub(crate) fn weight_ratio(weight: f64, max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    clamp(weight / max, 0.0, 1.0)
}

pub(crate) fn cloud_font_size(ratio: f64) -> f64 {
    lerp(CLOUD_MIN_FONT, CLOUD_MAX_FONT, ratio)
}

/// Heat intensity in `[0, 1]` relative to the grid maximum
pub(crate) fn heat_intensity(value: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (value as f64 / (max as f64 * HEAT_SATURATION)).min(1.0)
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub(crate) fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Channel-wise interpolation, `t` clamped to `[0, 1]`
pub(crate) fn lerp_rgb(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = clamp(t, 0.0, 1.0);
    let channel = |a: u8, b: u8| lerp(a as f64, b as f64, t).round() as u8;
    Rgb::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// Two-segment gradient: `cold -> mid` below 0.5, `mid -> hot` from 0.5 up
pub(crate) fn gradient_color(cold: Rgb, mid: Rgb, hot: Rgb, intensity: f64) -> Rgb {
    if intensity < 0.5 {
        lerp_rgb(cold, mid, intensity * 2.0)
    } else {
        lerp_rgb(mid, hot, (intensity - 0.5) * 2.0)
    }
}
