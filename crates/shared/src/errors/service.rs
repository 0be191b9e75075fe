use crate::errors::repository::RepositoryError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("SKU must be unique. Product with SKU '{sku}' already exists.")]
    DuplicateSku { sku: String },

    #[error("Product not found with id: {id}")]
    NotFound { id: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn duplicate_sku(sku: impl Into<String>) -> Self {
        ServiceError::DuplicateSku { sku: sku.into() }
    }

    pub fn not_found(id: i64) -> Self {
        ServiceError::NotFound { id }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: invalid value ({})", e.code),
                })
            })
            .collect();

        messages.sort();

        ServiceError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2))]
        name: String,
        #[validate(range(min = 1, message = "Price must be greater than 0"))]
        price: i64,
    }

    #[test]
    fn validation_errors_are_flattened_per_field() {
        let probe = Probe {
            name: "x".into(),
            price: 0,
        };
        let errors = probe.validate().unwrap_err();

        match ServiceError::from(errors) {
            ServiceError::Validation(messages) => {
                assert_eq!(
                    messages,
                    vec![
                        "name: invalid value (length)".to_string(),
                        "price: Price must be greater than 0".to_string(),
                    ]
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_sku_message_names_the_sku() {
        let err = ServiceError::duplicate_sku("X1");
        assert_eq!(
            err.to_string(),
            "SKU must be unique. Product with SKU 'X1' already exists."
        );
    }
}
