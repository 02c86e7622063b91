//! Request validation: untyped wire fields in, typed request out.

use causerie_core::{DEFAULT_FREQUENCY_PENALTY, DEFAULT_TOP_P, Error, Result, SamplingParams};
use serde::Deserialize;
use serde_json::Value;

/// Raw turn request as it arrives off the wire.
///
/// Every field is optional and untyped; [`validate`] owns the type policy
/// so nothing downstream ever sees unvalidated data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTurnRequest {
    pub prompt: Option<Value>,
    pub is_new_conversation: Option<Value>,
    pub pseudo: Option<Value>,
    pub randomness: Option<Value>,
    pub richness: Option<Value>,
    pub ai_personality: Option<Value>,
    pub conversation_id: Option<Value>,
}

/// A validated, immutable turn request.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    pub prompt: String,
    pub pseudo: String,
    pub new_conversation: bool,
    pub conversation_id: Option<String>,
    pub persona: Option<String>,
    pub sampling: SamplingParams,
}

/// Check every field rule and shape a [`TurnRequest`], or fail naming the
/// offending field. Pure function of the input.
pub fn validate(raw: &RawTurnRequest) -> Result<TurnRequest> {
    let pseudo = required_string(raw.pseudo.as_ref(), "pseudo")?;
    let prompt = required_string(raw.prompt.as_ref(), "prompt")?;
    let conversation_id = optional_string(raw.conversation_id.as_ref(), "conversationId")?;
    let persona = optional_string(raw.ai_personality.as_ref(), "aiPersonality")?;
    let top_p = ranged_number(raw.randomness.as_ref(), "randomness", 0.0, 1.0, DEFAULT_TOP_P)?;
    let frequency_penalty = ranged_number(
        raw.richness.as_ref(),
        "richness",
        -2.0,
        2.0,
        DEFAULT_FREQUENCY_PENALTY,
    )?;

    Ok(TurnRequest {
        prompt,
        pseudo,
        new_conversation: truthy_flag(raw.is_new_conversation.as_ref()),
        conversation_id,
        persona,
        sampling: SamplingParams {
            top_p,
            frequency_penalty,
        },
    })
}

fn required_string(value: Option<&Value>, field: &'static str) -> Result<String> {
    match value {
        None | Some(Value::Null) => Err(Error::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(Error::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// JSON null and the empty string both count as absent.
fn optional_string(value: Option<&Value>, field: &'static str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

fn ranged_number(
    value: Option<&Value>,
    field: &'static str,
    min: f64,
    max: f64,
    default: f32,
) -> Result<f32> {
    let Some(value) = value else {
        return Ok(default);
    };
    if value.is_null() {
        return Ok(default);
    }

    let number = value.as_f64().ok_or(Error::InvalidType {
        field,
        expected: "a number",
    })?;
    if !(min..=max).contains(&number) {
        return Err(Error::OutOfRange { field, min, max });
    }

    #[expect(clippy::cast_possible_truncation, reason = "sampling parameters fit in f32")]
    let number = number as f32;
    Ok(number)
}

/// Boolean `true` or the literal string `"true"`; anything else is false.
fn truthy_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[expect(clippy::expect_used, reason = "test setup should panic with context")]
    fn raw(body: Value) -> RawTurnRequest {
        serde_json::from_value(body).expect("raw request should deserialize")
    }

    #[test]
    fn minimal_request_gets_defaults() {
        let request = validate(&raw(json!({"prompt": "Hi", "pseudo": "alice"})));

        let request = match request {
            Ok(request) => request,
            Err(err) => panic!("expected valid request, got {err}"),
        };
        assert_eq!(request.prompt, "Hi");
        assert_eq!(request.pseudo, "alice");
        assert!(!request.new_conversation);
        assert!(request.conversation_id.is_none());
        assert!(request.persona.is_none());
        assert!((request.sampling.top_p - 0.6).abs() < f32::EPSILON);
        assert!((request.sampling.frequency_penalty - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn pseudo_is_required() {
        let err = validate(&raw(json!({"prompt": "Hi"})));
        assert!(matches!(err, Err(Error::MissingField("pseudo"))));

        let err = validate(&raw(json!({"prompt": "Hi", "pseudo": ""})));
        assert!(matches!(err, Err(Error::MissingField("pseudo"))));

        let err = validate(&raw(json!({"prompt": "Hi", "pseudo": 42})));
        assert!(matches!(
            err,
            Err(Error::InvalidType { field: "pseudo", .. })
        ));
    }

    #[test]
    fn prompt_is_required() {
        let err = validate(&raw(json!({"pseudo": "alice"})));
        assert!(matches!(err, Err(Error::MissingField("prompt"))));
    }

    #[test]
    fn conversation_id_must_be_a_string() {
        let err = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "conversationId": 7}),
        ));
        assert!(matches!(
            err,
            Err(Error::InvalidType {
                field: "conversationId",
                ..
            })
        ));

        // Empty id means "no id": the caller gets a fresh conversation.
        let request = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "conversationId": ""}),
        ));
        assert!(matches!(request, Ok(r) if r.conversation_id.is_none()));
    }

    #[test]
    fn personality_must_be_a_string() {
        let err = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "aiPersonality": false}),
        ));
        assert!(matches!(
            err,
            Err(Error::InvalidType {
                field: "aiPersonality",
                ..
            })
        ));

        let request = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "aiPersonality": ""}),
        ));
        assert!(matches!(request, Ok(r) if r.persona.is_none()));
    }

    #[test]
    fn randomness_bounds() {
        for bad in [-0.1, 1.5] {
            let err = validate(&raw(
                json!({"prompt": "Hi", "pseudo": "alice", "randomness": bad}),
            ));
            assert!(matches!(
                err,
                Err(Error::OutOfRange {
                    field: "randomness",
                    ..
                })
            ));
        }

        // An explicit zero is honored, not replaced by the default.
        let request = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "randomness": 0}),
        ));
        assert!(matches!(request, Ok(r) if r.sampling.top_p.abs() < f32::EPSILON));

        let err = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "randomness": "0.5"}),
        ));
        assert!(matches!(
            err,
            Err(Error::InvalidType {
                field: "randomness",
                ..
            })
        ));
    }

    #[test]
    fn richness_bounds() {
        for bad in [-2.5, 3.0] {
            let err = validate(&raw(
                json!({"prompt": "Hi", "pseudo": "alice", "richness": bad}),
            ));
            assert!(matches!(
                err,
                Err(Error::OutOfRange {
                    field: "richness",
                    ..
                })
            ));
        }

        let request = validate(&raw(
            json!({"prompt": "Hi", "pseudo": "alice", "richness": -2}),
        ));
        assert!(matches!(request, Ok(r) if (r.sampling.frequency_penalty + 2.0).abs() < f32::EPSILON));
    }

    #[test]
    fn new_conversation_flag_parsing() {
        let truthy = [json!(true), json!("true")];
        for flag in truthy {
            let request = validate(&raw(
                json!({"prompt": "Hi", "pseudo": "alice", "isNewConversation": flag}),
            ));
            assert!(matches!(request, Ok(r) if r.new_conversation));
        }

        let falsy = [json!(false), json!("yes"), json!(1), json!(null)];
        for flag in falsy {
            let request = validate(&raw(
                json!({"prompt": "Hi", "pseudo": "alice", "isNewConversation": flag}),
            ));
            assert!(matches!(request, Ok(r) if !r.new_conversation));
        }
    }
}
