//! Page-embedded configuration
//!
//! A page may carry overrides in
//! `<script type="application/json" id="strauss-config">`. Every field is
//! optional.

use serde::{Deserialize, Serialize};
use strauss_motion::{MotionConfig, MotionError, MotionResult};
use web_sys::Document;

pub const CONFIG_ELEMENT_ID: &str = "strauss-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// `tracing` level name: error, warn, info, debug or trace
    pub log_level: String,
    pub motion: MotionConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            motion: MotionConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.level()?;
        config.motion.validate()?;
        Ok(config)
    }

    /// Read the config block; a page without one gets the defaults
    pub fn load(document: &Document) -> MotionResult<Self> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn level(&self) -> MotionResult<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| MotionError::config(format!("unknown log level {:?}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = PageConfig::from_json(
            r#"{"log_level": "debug", "motion": {"particles": {"target_count": 5}}}"#,
        )
        .unwrap();
        assert_eq!(config.level().unwrap(), tracing::Level::DEBUG);
        assert_eq!(config.motion.particles.target_count, 5);
        assert_eq!(config.motion.splash.fade_ms, 500.0);
    }

    #[test]
    fn test_rejects_bad_level() {
        let err = PageConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, MotionError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            PageConfig::from_json("{ particles"),
            Err(MotionError::Config(_))
        ));
    }
}
