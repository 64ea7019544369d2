//! Viewer settings and preferences
//!
//! Persisted in LocalStorage, separate from the host's drawing storage.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Next preset, wrapping from High back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Segments for small circles (stars, craters, shadows)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 20,
            QualityPreset::High => 32,
        }
    }

    /// Segments for the round joins of pen strokes
    pub fn join_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 6,
            QualityPreset::High => 10,
        }
    }

    /// Radial rings of the shaded planet mesh
    pub fn planet_rings(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }

    /// Angular segments of the shaded planet mesh
    pub fn planet_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 96,
            QualityPreset::Medium => 160,
            QualityPreset::High => 256,
        }
    }
}

/// Viewer settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality preset
    pub quality: QualityPreset,
    /// Star twinkle animation
    pub twinkle: bool,
    /// Ground shadows under jumping sheep
    pub shadows: bool,
    /// Reduced motion (freezes twinkle)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            twinkle: true,
            shadows: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        self.twinkle && !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "draw_sheep_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_freezes_twinkle() {
        let mut settings = Settings::default();
        assert!(settings.effective_twinkle());
        settings.reduced_motion = true;
        assert!(!settings.effective_twinkle());
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(Settings::from_preset(QualityPreset::Low).quality.as_str(), "Low");
        assert_eq!(QualityPreset::High.next(), QualityPreset::Low);
    }

    #[test]
    fn test_partial_settings_json() {
        let s: Settings = serde_json::from_str(r#"{"shadows": false}"#).unwrap();
        assert!(!s.shadows);
        assert!(s.twinkle);
        assert_eq!(s.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_higher_quality_more_segments() {
        assert!(QualityPreset::High.circle_segments() > QualityPreset::Low.circle_segments());
        assert!(QualityPreset::High.planet_rings() > QualityPreset::Low.planet_rings());
    }
}
