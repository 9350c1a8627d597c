use std::{fmt, str::FromStr};

use secrecy::SecretString;

use crate::{
    Error, Result,
    builder::{GenerationConfigBuilder, SafetySettingsBuilder},
    types::{GenerationConfig, HarmBlockThreshold, SafetySetting},
};

const BASE_URI: &str = "https://generativelanguage.googleapis.com";

/// Gemini model identifiers
///
/// [API Reference](https://ai.google.dev/gemini-api/docs/models)
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    #[default]
    Gemini20Flash,
    Gemini20FlashLite,
    Gemini25Pro,
    Gemini25Flash,
    Gemini15Pro,
    Gemini15Flash,
    /// Any other model name, sent verbatim
    Custom(String),
}

impl Model {
    const KNOWN: [Model; 6] = [
        Model::Gemini20Flash,
        Model::Gemini20FlashLite,
        Model::Gemini25Pro,
        Model::Gemini25Flash,
        Model::Gemini15Pro,
        Model::Gemini15Flash,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini15Pro => "gemini-1.5-pro",
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::Custom(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|model| model.as_str() == name)
            .unwrap_or_else(|| Model::Custom(name.into()))
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

fn model_endpoint(model: &Model) -> String {
    format!("{BASE_URI}/v1beta/models/{model}")
}

/// Settings shared by every call made through a [crate::Client]
///
/// Immutable once built. The API key is held as a [SecretString] and never shows up in `Debug`
/// output.
#[derive(Debug)]
pub struct Config {
    pub(crate) key: SecretString,
    model: Model,
    base_url: String,
    safety_settings: Option<Vec<SafetySetting>>,
    generation_config: Option<GenerationConfig>,
}

impl Config {
    /// The default model with [Config::default_safety_settings] and service-default generation
    pub fn new(key: impl Into<SecretString>) -> Self {
        Self::with_model(key, Model::default())
    }

    pub fn with_model(key: impl Into<SecretString>, model: impl Into<Model>) -> Self {
        let model = model.into();
        Self {
            key: key.into(),
            base_url: model_endpoint(&model),
            model,
            safety_settings: Some(Self::default_safety_settings()),
            generation_config: None,
        }
    }

    /// Captures the current state of both builders as defaults.
    ///
    /// An untouched safety builder gives an empty list here, not the preset.
    pub fn create(
        key: impl Into<SecretString>,
        model: impl Into<Model>,
        safety: &SafetySettingsBuilder,
        generation: &GenerationConfigBuilder,
    ) -> Self {
        Self::builder(key)
            .model(model)
            .safety_settings(safety.build())
            .generation_config(generation.build())
            .build()
    }

    pub fn builder(key: impl Into<SecretString>) -> ConfigBuilder {
        ConfigBuilder {
            key: key.into(),
            model: Model::default(),
            base_url: None,
            safety_settings: None,
            generation_config: None,
        }
    }

    /// Same as [Config::new] with the key taken from `GEMINI_API_KEY`
    pub fn from_env() -> Result<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(Error::MissingApiKey),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Everything before `:generateContent`, e.g. `https://…/v1beta/models/gemini-2.0-flash`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn safety_settings(&self) -> Option<&[SafetySetting]> {
        self.safety_settings.as_deref()
    }

    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    /// Every category at [HarmBlockThreshold::BlockMediumAndAbove]
    pub fn default_safety_settings() -> Vec<SafetySetting> {
        SafetySettingsBuilder::new()
            .all(HarmBlockThreshold::BlockMediumAndAbove)
            .build()
    }

    /// Every category at [HarmBlockThreshold::BlockOnlyHigh]
    pub fn relaxed_safety_settings() -> Vec<SafetySetting> {
        SafetySettingsBuilder::new()
            .all(HarmBlockThreshold::BlockOnlyHigh)
            .build()
    }

    pub fn no_safety_settings() -> Vec<SafetySetting> {
        Vec::new()
    }

    pub fn creative_generation_config() -> GenerationConfig {
        GenerationConfigBuilder::new()
            .temperature(0.9)
            .top_p(0.9)
            .top_k(30)
            .max_output_tokens(1000)
            .build()
    }

    pub fn precise_generation_config() -> GenerationConfig {
        GenerationConfigBuilder::new()
            .temperature(0.2)
            .top_p(0.3)
            .top_k(5)
            .max_output_tokens(500)
            .build()
    }
}

/// Builder returned by [Config::builder]
pub struct ConfigBuilder {
    key: SecretString,
    model: Model,
    base_url: Option<String>,
    safety_settings: Option<Vec<SafetySetting>>,
    generation_config: Option<GenerationConfig>,
}

impl ConfigBuilder {
    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint derived from the model. No trailing `:generateContent`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Left unset, requests carry no `safetySettings` and the service defaults apply
    pub fn safety_settings(mut self, safety_settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(safety_settings);
        self
    }

    pub fn generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = Some(generation_config);
        self
    }

    pub fn build(self) -> Config {
        let base_url = self
            .base_url
            .unwrap_or_else(|| model_endpoint(&self.model));
        Config {
            key: self.key,
            model: self.model,
            base_url,
            safety_settings: self.safety_settings,
            generation_config: self.generation_config,
        }
    }
}
