//! Request construction for the review call.
//!
//! Everything here is a pure function over `(code, language)` plus fixed
//! constants, so the exact request body can be asserted in tests without a
//! server. The schema below is the interoperability contract with the
//! service: field names and types must match [`crate::types`] exactly.

use serde_json::{json, Value};

/// System instruction sent with every review.
///
/// Persona plus the four evaluation axes, with a JSON-only,
/// single-language-of-response directive. The structured shape itself is
/// enforced separately by [`response_schema`].
pub const SYSTEM_PROMPT: &str = "\
You are an expert software engineer acting as a rigorous code reviewer.
For every snippet you receive:
1. Analyse potential bugs (logic errors, type errors, edge cases).
2. Check security (injections, data leaks, handling of secrets).
3. Evaluate performance (algorithmic complexity, memory usage).
4. Judge readability and best practices (DRY, SOLID, naming, comments).

Respond with structured JSON only, in English.
The score must reflect the overall quality of the code (0 to 100).";

/// Sampling temperature for every review call.
///
/// Kept low on purpose: schema-constrained output plus low temperature is
/// what makes repeated reviews of similar input comparably shaped and
/// comparably scored.
pub const TEMPERATURE: f64 = 0.2;

/// Builds the user-turn content embedding the declared language and the
/// literal code, fenced for clarity.
pub fn user_content(code: &str, language: &str) -> String {
    format!("Language: {language}\n\nCode to review:\n```{language}\n{code}\n```")
}

/// The strict output schema the model must conform to.
///
/// Uppercase type tags are the OpenAPI subset the Gemini REST API expects.
/// Per finding all four fields are required; per recommendation `fixedCode`
/// is the only optional field; at top level everything is required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Overall summary of the code review.",
            },
            "score": {
                "type": "NUMBER",
                "description": "A 0-100 score based on the quality of the code.",
            },
            "analysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "description": "Issue category (bug, security, performance, readability, best_practice).",
                        },
                        "finding": {
                            "type": "STRING",
                            "description": "The identified problem.",
                        },
                        "reasoning": {
                            "type": "STRING",
                            "description": "Step-by-step explanation of why this is a problem.",
                        },
                        "severity": {
                            "type": "STRING",
                            "description": "Severity (low, medium, high).",
                        },
                    },
                    "required": ["category", "finding", "reasoning", "severity"],
                },
            },
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "fixedCode": {
                            "type": "STRING",
                            "description": "A corrected code excerpt, when applicable.",
                        },
                    },
                    "required": ["title", "description"],
                },
            },
        },
        "required": ["summary", "score", "analysis", "recommendations"],
    })
}

/// Full request body for a `models/{model}:generateContent` call.
///
/// Deterministic for a given `(code, language, temperature)` — no
/// timestamps, no randomness.
pub fn request_body(code: &str, language: &str, temperature: f64) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": SYSTEM_PROMPT }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": user_content(code, language) }]
        }],
        "generationConfig": {
            "temperature": temperature,
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_content_embeds_language_and_fenced_code() {
        let content = user_content("print(1)", "python");
        assert_eq!(
            content,
            "Language: python\n\nCode to review:\n```python\nprint(1)\n```"
        );
    }

    #[test]
    fn request_body_is_deterministic() {
        let a = request_body("x = 1", "python", TEMPERATURE);
        let b = request_body("x = 1", "python", TEMPERATURE);
        assert_eq!(a, b);
    }

    #[test]
    fn request_body_carries_the_full_generation_config() {
        let body = request_body("x = 1", "python", TEMPERATURE);
        let config = &body["generationConfig"];
        assert_eq!(config["temperature"], json!(TEMPERATURE));
        assert_eq!(config["responseMimeType"], json!("application/json"));
        assert_eq!(config["responseSchema"], response_schema());
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            json!(SYSTEM_PROMPT)
        );
        assert_eq!(body["contents"][0]["role"], json!("user"));
    }

    #[test]
    fn schema_requires_every_contract_field() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["summary", "score", "analysis", "recommendations"])
        );
        assert_eq!(
            schema["properties"]["analysis"]["items"]["required"],
            json!(["category", "finding", "reasoning", "severity"])
        );
        // fixedCode stays optional.
        assert_eq!(
            schema["properties"]["recommendations"]["items"]["required"],
            json!(["title", "description"])
        );
    }
}
