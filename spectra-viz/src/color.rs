//! Heat color ramp: blue -> cyan -> green -> yellow -> red

/// Linear RGB color, channels in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to [0, 1])
    pub fn scaled(self, factor: f32) -> Self {
        let k = factor.clamp(0.0, 1.0);
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Quantize to 8-bit channels
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

/// Map `t` in [0, 1] to a four-segment heat color
///
/// Input outside [0, 1] (or NaN) is clamped, so every channel stays in range.
pub fn heat_color(t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t < 0.25 {
        Rgb::new(0.0, t * 4.0, 1.0)
    } else if t < 0.5 {
        Rgb::new(0.0, 1.0, 1.0 - (t - 0.25) * 4.0)
    } else if t < 0.75 {
        Rgb::new((t - 0.5) * 4.0, 1.0, 0.0)
    } else {
        Rgb::new(1.0, 1.0 - (t - 0.75) * 4.0, 0.0)
    }
}
