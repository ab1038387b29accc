//! Inline style snippets injected by the controllers

/// Format a number the way JavaScript string interpolation does
///
/// Plain decimals for magnitudes in `[1e-6, 1e21)` (`50`,
/// `0.30000000000000004`), exponent form outside it (`1e+21`, `1.5e-7`).
/// Non-finite values are spelled `NaN`, `Infinity` and `-Infinity`, and
/// negative zero prints as `0`.
pub fn js_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

/// `translateY(...)` with a pixel offset
pub fn translate_y_px(offset: f64) -> String {
    format!("translateY({}px)", js_number(offset))
}

/// Seconds value for animation timing properties
pub fn seconds(value: f64) -> String {
    format!("{}s", js_number(value))
}

/// Percentage value
pub fn percent(value: f64) -> String {
    format!("{}%", js_number(value))
}

pub const PROGRESS_BAR_CSS: &str = "
      position: fixed;
      top: 0;
      left: 0;
      width: 0%;
      height: 3px;
      background: linear-gradient(90deg, var(--accent-color), #d49a02);
      z-index: 9999;
      transition: width 0.1s ease;
    ";

pub const LOADING_SCREEN_CSS: &str = "
      position: fixed;
      top: 0;
      left: 0;
      width: 100%;
      height: 100%;
      background: var(--primary-color);
      display: flex;
      justify-content: center;
      align-items: center;
      z-index: 10000;
      transition: opacity 0.5s ease;
    ";

pub const LOADING_SCREEN_HTML: &str = r#"
      <div style="text-align: center; color: white;">
        <div class="loading-spinner" style="width: 50px; height: 50px; margin: 0 auto 20px;"></div>
        <h2>Carregando Strauss...</h2>
        <p style="color: var(--accent-color); margin-top: 10px;">LIFTING PLATFORMS</p>
      </div>
    "#;

pub const TYPEWRITER_CURSOR: &str = "3px solid var(--accent-color)";
