use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value.
///
/// Malformed bodies keep axum's rejection status. Rule violations become
/// `400` with one message list per field under `details`.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "error": "Invalid JSON",
                    "message": rejection.body_text(),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| {
            let details = field_messages(&errors);
            let payload = json!({
                "error": "Validation failed",
                "message": summary(&details),
                "details": Value::Object(
                    details
                        .into_iter()
                        .map(|(field, messages)| (field, json!(messages)))
                        .collect::<Map<_, _>>(),
                ),
            });
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        },
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors.iter().map(|e| describe(&field, e)).collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn summary(details: &BTreeMap<String, Vec<String>>) -> String {
    let parts: Vec<String> = details
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}
