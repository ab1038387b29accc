//! Timing and tuning configuration
//!
//! Every constant the landing page effects depend on lives here. The
//! defaults reproduce the shipped page exactly; a page may override any
//! subset through JSON (see `strauss-web`).

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, MotionResult};

/// Visibility ratio that triggers a reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Root margin of the reveal watcher (bottom edge pulled in by 50px)
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Per-index delay for staggered list reveals, in seconds
pub const REVEAL_STAGGER_S: f64 = 0.1;

/// Live particle count the replenishment task aims for
pub const PARTICLE_TARGET_COUNT: usize = 20;

/// Cadence of the particle replenishment check in milliseconds
pub const PARTICLE_SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Delay before the first typed character in milliseconds
pub const TYPEWRITER_START_DELAY_MS: f64 = 1000.0;

/// Delay between typed characters in milliseconds
pub const TYPEWRITER_CHAR_INTERVAL_MS: f64 = 100.0;

/// How long the cursor lingers after the last character in milliseconds
pub const TYPEWRITER_CURSOR_LINGER_MS: f64 = 1000.0;

/// Parallax offset per scrolled pixel
pub const PARALLAX_SPEED: f64 = 0.1;

/// Per-index delay of the mobile menu link fade-in, in seconds
pub const NAV_STAGGER_S: f64 = 0.1;

/// Duration of the custom smooth scroll in milliseconds
pub const SMOOTH_SCROLL_DURATION_MS: f64 = 800.0;

/// Scroll offset past which the header may hide, in pixels
pub const HEADER_HIDE_THRESHOLD_PX: f64 = 100.0;

/// Delay between window load and the splash fade, in milliseconds
pub const SPLASH_PRE_FADE_MS: f64 = 1000.0;

/// Duration of the splash fade, in milliseconds
pub const SPLASH_FADE_MS: f64 = 500.0;

/// Limit of the throttled scroll hook, in milliseconds
pub const SCROLL_THROTTLE_MS: f64 = 16.0;

/// Half-open numeric range `[min, max)` used for randomized parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` onto the range
    pub fn sample(&self, unit: f64) -> f64 {
        unit * (self.max - self.min) + self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    fn validate(&self, name: &str) -> MotionResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.max < self.min {
            return Err(MotionError::config(format!(
                "{} range [{}, {}) is invalid",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Reveal-on-scroll tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_s: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN.to_string(),
            stagger_s: REVEAL_STAGGER_S,
        }
    }
}

/// Particle system tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub target_count: usize,
    pub spawn_interval_ms: f64,
    /// Edge length in px
    pub size_px: Range,
    /// Horizontal offset in percent of the container
    pub left_percent: Range,
    /// CSS animation duration in seconds
    pub duration_s: Range,
    /// CSS animation delay in seconds
    pub delay_s: Range,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            target_count: PARTICLE_TARGET_COUNT,
            spawn_interval_ms: PARTICLE_SPAWN_INTERVAL_MS,
            size_px: Range::new(2.0, 8.0),
            left_percent: Range::new(0.0, 100.0),
            duration_s: Range::new(10.0, 20.0),
            delay_s: Range::new(0.0, 5.0),
        }
    }
}

/// Typewriter tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub start_delay_ms: f64,
    pub char_interval_ms: f64,
    pub cursor_linger_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: TYPEWRITER_START_DELAY_MS,
            char_interval_ms: TYPEWRITER_CHAR_INTERVAL_MS,
            cursor_linger_ms: TYPEWRITER_CURSOR_LINGER_MS,
        }
    }
}

/// Parallax tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed: PARALLAX_SPEED,
        }
    }
}

/// Navigation tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub stagger_s: f64,
    pub smooth_scroll_ms: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            stagger_s: NAV_STAGGER_S,
            smooth_scroll_ms: SMOOTH_SCROLL_DURATION_MS,
        }
    }
}

/// Header show/hide tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub hide_threshold_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            hide_threshold_px: HEADER_HIDE_THRESHOLD_PX,
        }
    }
}

/// Loading splash tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub pre_fade_ms: f64,
    pub fade_ms: f64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            pre_fade_ms: SPLASH_PRE_FADE_MS,
            fade_ms: SPLASH_FADE_MS,
        }
    }
}

/// Complete configuration of the landing page effects
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal: RevealConfig,
    pub particles: ParticleConfig,
    pub typewriter: TypewriterConfig,
    pub parallax: ParallaxConfig,
    pub navigation: NavigationConfig,
    pub header: HeaderConfig,
    pub splash: SplashConfig,
    pub scroll_throttle_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            particles: ParticleConfig::default(),
            typewriter: TypewriterConfig::default(),
            parallax: ParallaxConfig::default(),
            navigation: NavigationConfig::default(),
            header: HeaderConfig::default(),
            splash: SplashConfig::default(),
            scroll_throttle_ms: SCROLL_THROTTLE_MS,
        }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make an effect meaningless or divide by zero
    pub fn validate(&self) -> MotionResult<()> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(MotionError::config(format!(
                "reveal threshold {} is outside [0, 1]",
                self.reveal.threshold
            )));
        }

        let p = &self.particles;
        p.size_px.validate("particle size")?;
        p.left_percent.validate("particle left")?;
        p.duration_s.validate("particle duration")?;
        p.delay_s.validate("particle delay")?;

        let durations = [
            ("particle spawn interval", p.spawn_interval_ms),
            ("typewriter char interval", self.typewriter.char_interval_ms),
            ("smooth scroll duration", self.navigation.smooth_scroll_ms),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(MotionError::config(format!("{} must be positive, got {}", name, value)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_constants() {
        let config = MotionConfig::default();
        assert_eq!(config.particles.target_count, 20);
        assert_eq!(config.particles.spawn_interval_ms, 2000.0);
        assert_eq!(config.particles.size_px, Range::new(2.0, 8.0));
        assert_eq!(config.particles.duration_s, Range::new(10.0, 20.0));
        assert_eq!(config.particles.delay_s, Range::new(0.0, 5.0));
        assert_eq!(config.typewriter.start_delay_ms, 1000.0);
        assert_eq!(config.typewriter.char_interval_ms, 100.0);
        assert_eq!(config.navigation.smooth_scroll_ms, 800.0);
        assert_eq!(config.header.hide_threshold_px, 100.0);
        assert_eq!(config.splash.pre_fade_ms, 1000.0);
        assert_eq!(config.splash.fade_ms, 500.0);
        assert_eq!(config.scroll_throttle_ms, 16.0);
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = MotionConfig::from_json(r#"{"particles": {"target_count": 8}}"#).unwrap();
        assert_eq!(config.particles.target_count, 8);
        assert_eq!(config.particles.spawn_interval_ms, 2000.0);
        assert_eq!(config.typewriter, TypewriterConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(MotionConfig::from_json("{}").unwrap(), MotionConfig::default());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = MotionConfig::from_json(r#"{"particles": {"size_px": {"min": 8, "max": 2}}}"#)
            .unwrap_err();
        assert!(matches!(err, MotionError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_char_interval() {
        let err = MotionConfig::from_json(r#"{"typewriter": {"char_interval_ms": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("typewriter char interval"));
    }

    #[test]
    fn test_rejects_threshold_above_one() {
        assert!(MotionConfig::from_json(r#"{"reveal": {"threshold": 1.5}}"#).is_err());
    }

    #[test]
    fn test_range_sample() {
        let range = Range::new(10.0, 20.0);
        assert_eq!(range.sample(0.0), 10.0);
        assert_eq!(range.sample(0.5), 15.0);
        assert!(range.contains(range.sample(0.999)));
    }
}
