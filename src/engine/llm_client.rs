use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::level::{Choice, GameLevel, NpcFeedback};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

/// Thin blocking client for the structured-generation endpoint. Only
/// formats requests and extracts the returned text; all fallback policy
/// lives in the content provider.
pub struct LlmClient {
    http: Client,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// POST a prompt with a JSON response schema and return the raw
    /// generated text.
    pub fn generate(&self, prompt: &str, temperature: f32, schema: Value) -> Result<String> {
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let url = format!("{API_BASE}/{MODEL}:generateContent?key={}", self.api_key);
        let resp: GenerateResponse = self
            .http
            .post(&url)
            .json(&req)
            .send()?
            .error_for_status()?
            .json()?;

        let text = resp
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(anyhow!("empty generation response"));
        }
        Ok(text)
    }
}

pub fn level_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "scenario": {
                "type": "STRING",
                "description": "Deskripsi situasi cinematic dalam 2-3 kalimat."
            },
            "location": { "type": "STRING" },
            "choices": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "text": { "type": "STRING", "description": "Teks pilihan tindakan." },
                        "type": { "type": "STRING", "enum": ["good", "neutral", "bad"] },
                        "impact": {
                            "type": "OBJECT",
                            "properties": {
                                "iman": { "type": "INTEGER", "description": "Perubahan iman (+/-)" },
                                "amal": { "type": "INTEGER", "description": "Poin amal (+)" },
                                "lalai": { "type": "INTEGER", "description": "Poin lalai (+)" }
                            },
                            "required": ["iman", "amal", "lalai"]
                        },
                        "feedback": {
                            "type": "STRING",
                            "description": "Dampak langsung singkat (1 kalimat)."
                        }
                    },
                    "required": ["id", "text", "type", "impact", "feedback"]
                }
            }
        },
        "required": ["title", "scenario", "location", "choices"]
    })
}

pub fn mentor_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dialogue": {
                "type": "STRING",
                "description": "Respon personal Ustadz Hasan terhadap pilihan pemain."
            },
            "wisdom": {
                "type": "STRING",
                "description": "Kutipan hadits atau nasihat pendek yang relevan."
            }
        },
        "required": ["dialogue", "wisdom"]
    })
}

/// Level payload as generated: everything but the id, which the caller
/// derives from the level index.
#[derive(Debug, Deserialize)]
struct LevelPayload {
    title: String,
    scenario: String,
    location: String,
    choices: Vec<Choice>,
}

/// Decode generated level JSON. A payload without exactly 3 choices is
/// treated the same as malformed JSON.
pub fn decode_level(text: &str, level_index: usize) -> Result<GameLevel> {
    let payload: LevelPayload = serde_json::from_str(text)?;
    if payload.choices.len() != 3 {
        return Err(anyhow!("expected 3 choices, got {}", payload.choices.len()));
    }
    Ok(GameLevel {
        id: level_index as u32 + 1,
        title: payload.title,
        scenario: payload.scenario,
        location: payload.location,
        choices: payload.choices,
    })
}

pub fn decode_mentor(text: &str) -> Result<NpcFeedback> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::level::ChoiceKind;

    const LEVEL_JSON: &str = r#"{
        "title": "Fajar",
        "scenario": "Adzan subuh terdengar.",
        "location": "Kamar",
        "choices": [
            {"id":"a","text":"Bangun","type":"good",
             "impact":{"iman":15,"amal":20,"lalai":0},"feedback":"Bagus."},
            {"id":"b","text":"Nanti","type":"neutral",
             "impact":{"iman":5,"amal":5,"lalai":0},"feedback":"Hmm."},
            {"id":"c","text":"Tidur lagi","type":"bad",
             "impact":{"iman":-10,"amal":0,"lalai":15},"feedback":"Sayang."}
        ]
    }"#;

    #[test]
    fn well_formed_level_decodes_with_derived_id() {
        let level = decode_level(LEVEL_JSON, 3).unwrap();
        assert_eq!(level.id, 4);
        assert_eq!(level.choices.len(), 3);
        assert_eq!(level.choices[0].kind, ChoiceKind::Good);
        assert_eq!(level.choices[2].impact.iman, -10);
    }

    #[test]
    fn wrong_choice_count_is_rejected() {
        let json = r#"{
            "title":"t","scenario":"s","location":"l",
            "choices":[
                {"id":"a","text":"x","type":"good",
                 "impact":{"iman":1,"amal":1,"lalai":0},"feedback":"f"}
            ]
        }"#;
        assert!(decode_level(json, 0).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(decode_level("not json at all", 0).is_err());
        assert!(decode_level("{\"title\":\"only\"}", 0).is_err());
    }

    #[test]
    fn mentor_payload_round_trips() {
        let fb = decode_mentor(r#"{"dialogue":"Renungkan.","wisdom":"Niat."}"#).unwrap();
        assert_eq!(fb.dialogue, "Renungkan.");
        assert_eq!(fb.wisdom, "Niat.");
    }

    #[test]
    fn schemas_declare_their_required_fields() {
        let level = level_schema();
        assert_eq!(level["required"][3], "choices");
        let mentor = mentor_schema();
        assert_eq!(mentor["required"][0], "dialogue");
    }
}
