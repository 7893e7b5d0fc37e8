//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore REST wraps every value in a single-key object naming its type,
//! e.g. `{"stringValue": "a"}`. Integers travel as strings.

use crate::utils::error::{IntakeError, Result};
use serde_json::{json, Map, Value};

/// Fields stored as `timestampValue` so the service can order by them.
const TIMESTAMP_FIELDS: &[&str] = &["submissionDate"];

pub fn encode_fields(document: &Value) -> Result<Map<String, Value>> {
    let Value::Object(object) = document else {
        return Err(IntakeError::MalformedDataError {
            message: "a document must serialize to a JSON object".to_string(),
        });
    };

    Ok(object
        .iter()
        .map(|(key, value)| {
            let timestamp = TIMESTAMP_FIELDS.contains(&key.as_str());
            (key.clone(), encode_value(value, timestamp))
        })
        .collect())
}

fn encode_value(value: &Value, timestamp: bool) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) if timestamp => json!({ "timestampValue": s }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(|v| encode_value(v, false)).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v, false)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Value> {
    let mut object = Map::with_capacity(fields.len());
    for (key, value) in fields {
        object.insert(key.clone(), decode_value(value)?);
    }
    Ok(Value::Object(object))
}

fn decode_value(value: &Value) -> Result<Value> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(IntakeError::MalformedDataError {
            message: format!("expected a typed Firestore value, got {}", value),
        });
    };

    let decoded = match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| IntakeError::MalformedDataError {
                    message: format!("integerValue {:?}: {}", s, e),
                })?,
            other => other.clone(),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            Value::Array(items)
        }
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields)?,
            None => Value::Object(Map::new()),
        },
        "geoPointValue" => inner.clone(),
        other => {
            tracing::warn!(kind = other, "unsupported Firestore value type, reading as null");
            Value::Null
        }
    };
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_marks_submission_date_as_timestamp() {
        let fields = encode_fields(&json!({
            "name": "Sarah",
            "submissionDate": "2026-10-18T09:30:00Z",
            "consentToProceed": true,
            "resume": null
        }))
        .unwrap();

        assert_eq!(fields["name"], json!({ "stringValue": "Sarah" }));
        assert_eq!(
            fields["submissionDate"],
            json!({ "timestampValue": "2026-10-18T09:30:00Z" })
        );
        assert_eq!(fields["consentToProceed"], json!({ "booleanValue": true }));
        assert_eq!(fields["resume"], json!({ "nullValue": null }));
    }

    #[test]
    fn test_encode_nested_structures() {
        let fields = encode_fields(&json!({
            "projects": [{ "name": "Atlas", "stars": 12 }]
        }))
        .unwrap();

        assert_eq!(
            fields["projects"],
            json!({
                "arrayValue": { "values": [
                    { "mapValue": { "fields": {
                        "name": { "stringValue": "Atlas" },
                        "stars": { "integerValue": "12" }
                    }}}
                ]}
            })
        );
    }

    #[test]
    fn test_decode_handles_empty_array_and_integers() {
        let fields = json!({
            "achievements": { "arrayValue": {} },
            "count": { "integerValue": "7" },
            "ratio": { "doubleValue": 0.5 }
        });
        let decoded = decode_fields(fields.as_object().unwrap()).unwrap();
        assert_eq!(decoded, json!({ "achievements": [], "count": 7, "ratio": 0.5 }));
    }

    #[test]
    fn test_decode_rejects_untyped_values() {
        let fields = json!({ "name": "plain" });
        assert!(decode_fields(fields.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_order_survives_encode_then_decode() {
        use crate::domain::model::{Order, Project, SocialLink};
        use chrono::{TimeZone, Utc};

        let order = Order {
            name: "Sarah Chen".to_string(),
            email: "sarah.chen@example.com".to_string(),
            desired_portfolio_style: "Minimal".to_string(),
            achievements: vec!["Speaker at RustConf".to_string()],
            projects: vec![Project {
                name: "Atlas".to_string(),
                link: "https://atlas.example.com".to_string(),
                description: "Vector tiles".to_string(),
                time: "2024".to_string(),
            }],
            social_links: vec![SocialLink {
                platform: "GitHub".to_string(),
                url: "https://github.com/sarahchen".to_string(),
            }],
            price_range: Some("399".to_string()),
            selected_features: vec!["siteSearch".to_string(), "contactForm".to_string()],
            preferred_colors: vec!["#1A237E".to_string()],
            selected_sections: vec!["blog".to_string()],
            other_requirements: "Dark mode".to_string(),
            consent_to_proceed: true,
            resume: Some("https://files.test/resumes%2Fcv.pdf?alt=media".to_string()),
            profile_photo: None,
            payment_screenshot: Some("https://files.test/upi.png".to_string()),
            submission_date: Some(Utc.timestamp_opt(1_760_780_000, 123_456_000).unwrap()),
        };

        let fields = encode_fields(&serde_json::to_value(&order).unwrap()).unwrap();
        assert!(fields["submissionDate"].get("timestampValue").is_some());

        let decoded: Order = serde_json::from_value(decode_fields(&fields).unwrap()).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(encode_fields(&json!(["not", "a", "document"])).is_err());
    }
}
