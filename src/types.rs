//! Wire types for the `generateContent` endpoint, plus the [Envelope] every call returns

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The producer of the content
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Outcome of a single call: the HTTP status and the decoded body, if there was one
///
/// A status of [Envelope::TRANSPORT_FAILURE] is not an HTTP status; it means the exchange
/// failed before a usable body was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: i32,
    pub body: Option<T>,
}

impl<T> Envelope<T> {
    pub const TRANSPORT_FAILURE: i32 = -1;

    pub fn new(status: i32, body: Option<T>) -> Self {
        Self { status, body }
    }

    pub fn failed() -> Self {
        Self::new(Self::TRANSPORT_FAILURE, None)
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status == Self::TRANSPORT_FAILURE
    }

    /// `true` for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request to generate content from the model
///
/// [API Reference](https://ai.google.dev/api/generate-content#request-body)
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContent {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContent {
    /// A request carrying a single user text part
    pub fn prompt(text: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(text)],
            }],
            ..Default::default()
        }
    }
}

/// Response from the model supporting multiple candidate responses
///
/// Every field is optional: a blocked prompt comes back with no candidates at all.
///
/// [API Reference](https://ai.google.dev/api/generate-content#generatecontentresponse)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl Response {
    /// Text of the first part of the first candidate
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or_default())
    }
}

/// A response candidate generated from the model
///
/// [API Reference](https://ai.google.dev/api/generate-content#candidate)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Kept as the raw wire string, the service adds new reasons over time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Feedback on the prompt itself, present when the prompt was blocked
///
/// [API Reference](https://ai.google.dev/api/generate-content#PromptFeedback)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

/// Metadata on the generation request's token usage
///
/// [API Reference](https://ai.google.dev/api/generate-content#UsageMetadata)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
    #[serde(default)]
    pub total_token_count: u64,
}

/// The base structured datatype containing multi-part content of a message
///
/// [API Reference](https://ai.google.dev/api/caching#Content)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single piece of a [Content] block. Only text is modelled.
///
/// [API Reference](https://ai.google.dev/api/caching#Part)
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Configuration options for model generation and outputs.
///
/// Absent fields are left out of the request and the service default applies. Values are sent
/// as given; out-of-range values are rejected remotely.
///
/// [API Reference](https://ai.google.dev/api/generate-content#v1beta.GenerationConfig)
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// Safety setting, affecting the safety-blocking behavior
///
/// Passing a safety setting for a category changes the allowed probability that content is blocked.
///
/// [API Reference](https://ai.google.dev/api/generate-content#safetysetting)
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }
}

/// The category of harm a [SafetySetting] applies to
///
/// [API Reference](https://ai.google.dev/api/generate-content#harmcategory)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Harassment content
    HarmCategoryHarassment,
    /// Hate speech and content
    HarmCategoryHateSpeech,
    /// Sexually explicit content
    HarmCategorySexuallyExplicit,
    /// Dangerous content
    HarmCategoryDangerousContent,
    /// Content that may be used to harm civic integrity
    HarmCategoryCivicIntegrity,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 5] = [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
        HarmCategory::HarmCategoryCivicIntegrity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HarmCategory::HarmCategoryHarassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HarmCategoryHateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::HarmCategorySexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::HarmCategoryDangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            HarmCategory::HarmCategoryCivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
        }
    }
}

impl fmt::Display for HarmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "harm category",
                value: s.into(),
            })
    }
}

/// Block at and beyond a specified harm probability
///
/// [API Reference](https://ai.google.dev/api/generate-content#HarmBlockThreshold)
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// All content will be allowed
    BlockNone,
    /// Content with negligible, low and medium harm probability will be allowed
    BlockOnlyHigh,
    /// Content with negligible and low harm probability will be allowed
    BlockMediumAndAbove,
    /// Content with negligible harm probability will be allowed
    BlockLowAndAbove,
}

impl HarmBlockThreshold {
    pub const ALL: [HarmBlockThreshold; 4] = [
        HarmBlockThreshold::BlockNone,
        HarmBlockThreshold::BlockOnlyHigh,
        HarmBlockThreshold::BlockMediumAndAbove,
        HarmBlockThreshold::BlockLowAndAbove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HarmBlockThreshold::BlockNone => "BLOCK_NONE",
            HarmBlockThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            HarmBlockThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            HarmBlockThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        }
    }
}

impl fmt::Display for HarmBlockThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmBlockThreshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|threshold| threshold.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "harm block threshold",
                value: s.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_request_omits_optional_keys() {
        let body = serde_json::to_value(GenerateContent::prompt("hi")).unwrap();
        assert_eq!(body, json!({ "contents": [{ "parts": [{ "text": "hi" }] }] }));

        let text = serde_json::to_string(&GenerateContent::prompt("hi")).unwrap();
        assert!(!text.contains("null"));
        assert!(!text.contains("safetySettings"));
        assert!(!text.contains("generationConfig"));
    }

    #[test]
    fn full_request_uses_wire_field_names() {
        let request = GenerateContent {
            safety_settings: Some(vec![SafetySetting::new(
                HarmCategory::HarmCategoryHateSpeech,
                HarmBlockThreshold::BlockLowAndAbove,
            )]),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.5),
                top_k: Some(3),
                stop_sequences: Some(vec!["END".into()]),
                ..Default::default()
            }),
            ..GenerateContent::prompt("hi")
        };

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "safetySettings": [
                    { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_LOW_AND_ABOVE" }
                ],
                "generationConfig": { "temperature": 0.5, "topK": 3, "stopSequences": ["END"] }
            })
        );
    }

    #[test]
    fn empty_safety_list_is_sent_as_empty_array() {
        let request = GenerateContent {
            safety_settings: Some(Vec::new()),
            ..GenerateContent::prompt("hi")
        };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body["safetySettings"], json!([]));
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let response: Response = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "hello" }] },
                "finishReason": "STOP",
                "safetyRatings": [],
                "avgLogprobs": -0.1
            }],
            "usageMetadata": { "promptTokenCount": 2, "candidatesTokenCount": 1, "totalTokenCount": 3 },
            "modelVersion": "gemini-2.0-flash"
        }))
        .unwrap();

        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.to_string(), "hello");
        let candidate = &response.candidates.as_ref().unwrap()[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(candidate.content.as_ref().unwrap().role, Some(Role::Model));
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 3);
    }

    #[test]
    fn blocked_response_has_no_text() {
        let response: Response = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        assert_eq!(response.candidates, None);
        assert_eq!(response.text(), None);
        assert_eq!(response.to_string(), "");
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn enums_round_trip_through_wire_strings() {
        for category in HarmCategory::ALL {
            let wire = serde_json::to_value(category).unwrap();
            assert_eq!(wire, json!(category.as_str()));
            assert_eq!(category.to_string().parse::<HarmCategory>().unwrap(), category);
        }
        for threshold in HarmBlockThreshold::ALL {
            let wire = serde_json::to_value(threshold).unwrap();
            assert_eq!(wire, json!(threshold.as_str()));
            assert_eq!(threshold.as_str().parse::<HarmBlockThreshold>().unwrap(), threshold);
        }
    }

    #[test]
    fn unknown_enum_strings_are_rejected() {
        let err = "HARM_CATEGORY_TOXICITY".parse::<HarmCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized harm category `HARM_CATEGORY_TOXICITY`");
        assert!("BLOCK_MED_AND_ABOVE".parse::<HarmBlockThreshold>().is_err());
        assert!(serde_json::from_value::<HarmBlockThreshold>(json!("OFF")).is_err());
    }

    #[test]
    fn envelope_status_helpers() {
        let failed = Envelope::<Response>::failed();
        assert!(failed.is_transport_failure());
        assert!(!failed.is_success());
        assert_eq!(failed.body, None);

        let ok = Envelope::new(204, None::<Response>);
        assert!(ok.is_success());
        assert!(!Envelope::new(400, None::<Response>).is_success());
    }
}
