use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

type Rejection = (StatusCode, Json<Value>);

/// JSON body that has passed its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

/// Query string that has passed its `validator` rules.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                (
                    rejection.status(),
                    Json(json!({
                        "status": "error",
                        "message": rejection.body_text(),
                    })),
                )
            })?;

        value.validate().map_err(|errors| invalid(&errors))?;

        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                (
                    rejection.status(),
                    Json(json!({
                        "status": "error",
                        "message": rejection.body_text(),
                    })),
                )
            })?;

        value.validate().map_err(|errors| invalid(&errors))?;

        Ok(Self(value))
    }
}

fn invalid(errors: &ValidationErrors) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "error",
            "message": summary(errors),
            "details": details(errors),
        })),
    )
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "url" => "Invalid URL format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "must_match" => "Values do not match".to_string(),
            _ => format!("Invalid {field}"),
        },
    }
}

fn summary(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |error| format!("{field}: {}", describe(field, error)))
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn details(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|error| describe(&field, error))
            .collect();
        map.insert(field.to_string(), json!(messages));
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 6))]
        password: String,
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = Signup {
            email: "nope".into(),
            password: "123".into(),
        }
        .validate()
        .unwrap_err();

        let (status, Json(body)) = invalid(&errors);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["details"]["email"][0], "Invalid email format");
        assert_eq!(body["details"]["password"][0], "Invalid length");
    }
}
