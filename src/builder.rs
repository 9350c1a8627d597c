//! Chainable builders for the two per-call settings objects
//!
//! ```rust
//! use gemini_generate::{GenerationConfigBuilder, SafetySettingsBuilder};
//!
//! let safety = SafetySettingsBuilder::new()
//!     .harassment_only_high()
//!     .dangerous_content_medium_and_above()
//!     .build();
//! assert_eq!(safety.len(), 2);
//!
//! let config = GenerationConfigBuilder::new()
//!     .temperature(0.4)
//!     .max_output_tokens(256)
//!     .build();
//! assert_eq!(config.top_k, None);
//! ```

use crate::types::{GenerationConfig, HarmBlockThreshold, HarmCategory, SafetySetting};

/// Accumulates an ordered list of [SafetySetting]s
///
/// Nothing is deduplicated: adding the same category twice sends it twice.
#[derive(Debug, Default, Clone)]
pub struct SafetySettingsBuilder {
    settings: Vec<SafetySetting>,
}

impl SafetySettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_setting(
        &mut self,
        category: HarmCategory,
        threshold: HarmBlockThreshold,
    ) -> &mut Self {
        self.settings.push(SafetySetting::new(category, threshold));
        self
    }

    /// Adds one setting per known category, all at `threshold`
    pub fn all(&mut self, threshold: HarmBlockThreshold) -> &mut Self {
        for category in HarmCategory::ALL {
            self.add_setting(category, threshold);
        }
        self
    }

    pub fn harassment_only_high(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryHarassment,
            HarmBlockThreshold::BlockOnlyHigh,
        )
    }

    pub fn harassment_medium_and_above(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryHarassment,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
    }

    pub fn hate_speech_only_high(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryHateSpeech,
            HarmBlockThreshold::BlockOnlyHigh,
        )
    }

    pub fn hate_speech_medium_and_above(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryHateSpeech,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
    }

    pub fn sexually_explicit_only_high(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategorySexuallyExplicit,
            HarmBlockThreshold::BlockOnlyHigh,
        )
    }

    pub fn sexually_explicit_medium_and_above(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategorySexuallyExplicit,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
    }

    pub fn dangerous_content_only_high(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryDangerousContent,
            HarmBlockThreshold::BlockOnlyHigh,
        )
    }

    pub fn dangerous_content_medium_and_above(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryDangerousContent,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
    }

    pub fn civic_integrity_only_high(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryCivicIntegrity,
            HarmBlockThreshold::BlockOnlyHigh,
        )
    }

    pub fn civic_integrity_medium_and_above(&mut self) -> &mut Self {
        self.add_setting(
            HarmCategory::HarmCategoryCivicIntegrity,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
    }

    /// Copy of the settings added so far. The builder can keep being used afterwards.
    pub fn build(&self) -> Vec<SafetySetting> {
        self.settings.clone()
    }
}

/// Accumulates a [GenerationConfig]
///
/// Setters accept either a value or `None`, the latter clearing the field again.
#[derive(Debug, Default, Clone)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(&mut self, temperature: impl Into<Option<f32>>) -> &mut Self {
        self.config.temperature = temperature.into();
        self
    }

    pub fn top_p(&mut self, top_p: impl Into<Option<f32>>) -> &mut Self {
        self.config.top_p = top_p.into();
        self
    }

    pub fn top_k(&mut self, top_k: impl Into<Option<i32>>) -> &mut Self {
        self.config.top_k = top_k.into();
        self
    }

    pub fn max_output_tokens(&mut self, max_output_tokens: impl Into<Option<i32>>) -> &mut Self {
        self.config.max_output_tokens = max_output_tokens.into();
        self
    }

    pub fn stop_sequences(&mut self, stop_sequences: Option<Vec<String>>) -> &mut Self {
        self.config.stop_sequences = stop_sequences;
        self
    }

    pub fn build(&self) -> GenerationConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn convenience_methods_delegate_in_order() {
        let settings = SafetySettingsBuilder::new()
            .harassment_only_high()
            .hate_speech_medium_and_above()
            .sexually_explicit_only_high()
            .dangerous_content_medium_and_above()
            .civic_integrity_only_high()
            .build();

        assert_eq!(
            settings,
            vec![
                SafetySetting::new(
                    HarmCategory::HarmCategoryHarassment,
                    HarmBlockThreshold::BlockOnlyHigh
                ),
                SafetySetting::new(
                    HarmCategory::HarmCategoryHateSpeech,
                    HarmBlockThreshold::BlockMediumAndAbove
                ),
                SafetySetting::new(
                    HarmCategory::HarmCategorySexuallyExplicit,
                    HarmBlockThreshold::BlockOnlyHigh
                ),
                SafetySetting::new(
                    HarmCategory::HarmCategoryDangerousContent,
                    HarmBlockThreshold::BlockMediumAndAbove
                ),
                SafetySetting::new(
                    HarmCategory::HarmCategoryCivicIntegrity,
                    HarmBlockThreshold::BlockOnlyHigh
                ),
            ]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let settings = SafetySettingsBuilder::new()
            .harassment_only_high()
            .harassment_medium_and_above()
            .build();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[1].threshold, HarmBlockThreshold::BlockMediumAndAbove);
    }

    #[test]
    fn build_is_a_snapshot() {
        let mut builder = SafetySettingsBuilder::new();
        builder.civic_integrity_medium_and_above();
        let first = builder.build();

        builder.add_setting(
            HarmCategory::HarmCategoryHateSpeech,
            HarmBlockThreshold::BlockNone,
        );

        assert_eq!(first.len(), 1);
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn empty_builder_builds_empty_list() {
        assert!(SafetySettingsBuilder::new().build().is_empty());
        assert_eq!(GenerationConfigBuilder::new().build(), GenerationConfig::default());
    }

    #[test]
    fn generation_setters_assign_and_clear() {
        let mut builder = GenerationConfigBuilder::new();
        builder
            .temperature(7.5)
            .top_p(0.1)
            .top_k(-3)
            .max_output_tokens(10)
            .stop_sequences(Some(vec!["STOP".into()]));

        let snapshot = builder.build();
        assert_eq!(snapshot.temperature, Some(7.5));
        assert_eq!(snapshot.top_k, Some(-3));
        assert_eq!(snapshot.stop_sequences, Some(vec!["STOP".to_string()]));

        builder.temperature(None).stop_sequences(None);
        let cleared = builder.build();
        assert_eq!(cleared.temperature, None);
        assert_eq!(cleared.stop_sequences, None);
        assert_eq!(cleared.max_output_tokens, Some(10));
        assert_eq!(snapshot.temperature, Some(7.5));
    }
}
