//! Speech-to-text client for the Google `speech:recognize` endpoint
//!
//! Posts base64-encoded LINEAR16 audio and returns the recognition
//! alternatives. Picking which alternative to trust is not this module's
//! problem; [`best_transcript`] simply takes the first one, which is what
//! the command pipeline consumes.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

const RECOGNIZE_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// One candidate transcription
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub transcript: String,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct Recognition {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<Recognition>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest<'a> {
    audio: AudioContent<'a>,
    config: RecognitionConfig<'a>,
}

#[derive(Serialize)]
struct AudioContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    model: &'static str,
    metadata: RecognitionMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionMetadata {
    interaction_type: &'static str,
}

/// Error type for recognition requests
#[derive(Debug)]
pub enum RecognizeError {
    /// Transport-level failure (connect, TLS, body read)
    Http(String),
    /// Non-success HTTP status from the service
    Status(u16, String),
    /// The service answered but found no speech in the audio
    EmptyResult,
}

impl fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognizeError::Http(msg) => write!(f, "recognition request failed: {}", msg),
            RecognizeError::Status(code, msg) => {
                write!(f, "recognition service returned {}: {}", code, msg)
            }
            RecognizeError::EmptyResult => write!(f, "recognition result is empty"),
        }
    }
}

impl std::error::Error for RecognizeError {}

/// Blocking client for the recognition service
pub struct RecognizeClient {
    http: reqwest::blocking::Client,
    api_key: String,
    language_code: String,
    sample_rate_hz: u32,
}

impl RecognizeClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key: api_key.to_string(),
            language_code: "en-US".to_string(),
            sample_rate_hz: 44100,
        }
    }

    pub fn with_language(mut self, language_code: &str) -> Self {
        self.language_code = language_code.to_string();
        self
    }

    pub fn with_sample_rate(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Send raw LINEAR16 audio bytes for recognition
    pub fn recognize(&self, audio: &[u8]) -> Result<Vec<Alternative>, RecognizeError> {
        let content = BASE64.encode(audio);
        let request = RecognizeRequest {
            audio: AudioContent { content: &content },
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: self.sample_rate_hz,
                language_code: &self.language_code,
                model: "command_and_search",
                metadata: RecognitionMetadata {
                    interaction_type: "VOICE_COMMAND",
                },
            },
        };

        let response = self
            .http
            .post(format!("{}?key={}", RECOGNIZE_URL, self.api_key))
            .json(&request)
            .send()
            .map_err(|e| RecognizeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RecognizeError::Status(status.as_u16(), body));
        }

        let parsed: RecognizeResponse = response
            .json()
            .map_err(|e| RecognizeError::Http(e.to_string()))?;

        let alternatives: Vec<Alternative> = parsed
            .results
            .into_iter()
            .flat_map(|r| r.alternatives)
            .collect();
        if alternatives.is_empty() {
            return Err(RecognizeError::EmptyResult);
        }
        Ok(alternatives)
    }
}

/// First alternative's transcript; the service orders them by confidence
pub fn best_transcript(alternatives: &[Alternative]) -> Option<&str> {
    alternatives.first().map(|a| a.transcript.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "results": [
                {
                    "alternatives": [
                        {"transcript": "fill first with hello", "confidence": 0.92},
                        {"transcript": "fell in first with hello"}
                    ]
                }
            ]
        }"#;
        let parsed: RecognizeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        let alts = &parsed.results[0].alternatives;
        assert_eq!(alts[0].transcript, "fill first with hello");
        assert!((alts[0].confidence - 0.92).abs() < 1e-6);
        assert_eq!(alts[1].confidence, 0.0);
    }

    #[test]
    fn test_empty_response_deserializes() {
        let parsed: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_request_wire_format() {
        let request = RecognizeRequest {
            audio: AudioContent { content: "QUJD" },
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: 44100,
                language_code: "en-US",
                model: "command_and_search",
                metadata: RecognitionMetadata {
                    interaction_type: "VOICE_COMMAND",
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["audio"]["content"], "QUJD");
        assert_eq!(json["config"]["sampleRateHertz"], 44100);
        assert_eq!(json["config"]["metadata"]["interactionType"], "VOICE_COMMAND");
    }

    #[test]
    fn test_best_transcript() {
        let alts = vec![
            Alternative {
                transcript: "focus first".to_string(),
                confidence: 0.9,
            },
            Alternative {
                transcript: "focus fourth".to_string(),
                confidence: 0.4,
            },
        ];
        assert_eq!(best_transcript(&alts), Some("focus first"));
        assert_eq!(best_transcript(&[]), None);
    }
}
