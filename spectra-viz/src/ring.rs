//! Circular bar-ring mapping

use std::f32::consts::TAU;

/// Ring geometry and animation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    /// Number of bars around the circle
    pub count: usize,
    pub radius: f32,
    /// Height of a bar with zero magnitude
    pub base_height: f32,
    /// Extra height at full magnitude
    pub height_range: f32,
    /// Peak additive height of the idle wave
    pub idle_amplitude: f32,
    /// Idle wave angular speed (rad/s)
    pub idle_speed: f32,
    /// Idle wave cycles around the ring
    pub idle_lobes: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            count: 64,
            radius: 10.0,
            base_height: 0.2,
            height_range: 6.0,
            idle_amplitude: 0.8,
            idle_speed: 1.5,
            idle_lobes: 3.0,
        }
    }
}

/// Position of a bar on the ring, in the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBar {
    pub angle: f32,
    pub x: f32,
    pub z: f32,
}

/// Bars arranged at equal angles on a fixed-radius circle
#[derive(Debug, Clone)]
pub struct BarRing {
    config: RingConfig,
    positions: Vec<RingBar>,
}

impl BarRing {
    pub fn new(config: RingConfig) -> Self {
        let count = config.count.max(1);
        let positions = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                RingBar {
                    angle,
                    x: config.radius * angle.cos(),
                    z: config.radius * angle.sin(),
                }
            })
            .collect();
        Self { config, positions }
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn positions(&self) -> &[RingBar] {
        &self.positions
    }

    /// Per-bar heights for this frame
    ///
    /// With a snapshot, bars sample it evenly and scale by magnitude. Without
    /// one (no active source), a deterministic idle wave of `elapsed_secs` and
    /// bar angle is added on top of the base height.
    pub fn heights(&self, snapshot: Option<&[u8]>, elapsed_secs: f32) -> Vec<f32> {
        let count = self.positions.len();
        let cfg = &self.config;

        self.positions
            .iter()
            .enumerate()
            .map(|(i, bar)| match snapshot {
                Some(bins) if !bins.is_empty() => {
                    let value = bins[i * bins.len() / count];
                    cfg.base_height + value as f32 / 255.0 * cfg.height_range
                }
                _ => {
                    let phase = cfg.idle_speed * elapsed_secs + bar.angle * cfg.idle_lobes;
                    cfg.base_height + cfg.idle_amplitude * (0.5 + 0.5 * phase.sin())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_on_circle() {
        let ring = BarRing::new(RingConfig {
            count: 8,
            radius: 5.0,
            ..Default::default()
        });
        assert_eq!(ring.positions().len(), 8);
        for (i, bar) in ring.positions().iter().enumerate() {
            let r = (bar.x * bar.x + bar.z * bar.z).sqrt();
            assert!((r - 5.0).abs() < 1e-4);
            assert!((bar.angle - i as f32 * TAU / 8.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_heights_from_snapshot() {
        let cfg = RingConfig {
            count: 4,
            ..Default::default()
        };
        let ring = BarRing::new(cfg);
        let snapshot = [255u8, 0, 0, 0, 0, 0, 0, 0];
        let h = ring.heights(Some(&snapshot), 0.0);
        assert!((h[0] - (cfg.base_height + cfg.height_range)).abs() < 1e-5);
        assert!((h[1] - cfg.base_height).abs() < 1e-5);
    }

    #[test]
    fn test_idle_is_deterministic_and_bounded() {
        let cfg = RingConfig::default();
        let ring = BarRing::new(cfg);
        for step in 0..200 {
            let t = step as f32 * 0.05;
            let a = ring.heights(None, t);
            let b = ring.heights(None, t);
            assert_eq!(a, b);
            for h in a {
                assert!(h >= cfg.base_height - 1e-5);
                assert!(h <= cfg.base_height + cfg.idle_amplitude + 1e-5);
            }
        }
    }

    #[test]
    fn test_idle_moves_over_time() {
        let ring = BarRing::new(RingConfig::default());
        assert_ne!(ring.heights(None, 0.0), ring.heights(None, 1.0));
    }

    #[test]
    fn test_zero_count_clamped() {
        let ring = BarRing::new(RingConfig {
            count: 0,
            ..Default::default()
        });
        assert_eq!(ring.heights(Some(&[10, 20]), 0.0).len(), 1);
    }
}
