use thiserror::Error;

use crate::lifecycle::LifecycleState;

pub type GfResult<T> = Result<T, GfError>;

/// Failure of a single validator.
///
/// Validators never know which property they are checking; the lifecycle
/// engine attaches the property name when it wraps this into
/// [`GfError::Validation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("value not specified")]
    NotSpecified,

    #[error("'{path}' not found")]
    NotFound { path: String },

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} out of range ({reason})")]
    OutOfRange { value: String, reason: &'static str },

    #[error("'{value}' is not one of [{choices}]")]
    NotInChoices { value: String, choices: String },

    #[error("non-finite value {value}")]
    NonFinite { value: f64 },

    #[error("{reason}")]
    Inconsistent { reason: String },
}

/// Error reported by an opaque numerical kernel.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct KernelError {
    pub message: String,
}

impl KernelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GfError {
    #[error("Invalid value for property '{property}': {source}")]
    Validation {
        property: String,
        #[source]
        source: ValidationError,
    },

    #[error("Lifecycle violation in '{component}': cannot {operation} while {state}")]
    Lifecycle {
        component: String,
        operation: &'static str,
        state: LifecycleState,
    },

    #[error("Kernel rejected configuration of '{component}': {message}")]
    KernelBinding { component: String, message: String },

    #[error("Unknown property '{property}' for component '{component}'")]
    UnknownProperty { component: String, property: String },

    #[error("Property '{property}' declared more than once")]
    DuplicateProperty { property: String },

    #[error("Required property '{property}' of '{component}' is not set")]
    MissingProperty { component: String, property: String },

    #[error("No factory '{factory}' in family '{family}'")]
    UnknownFactory { family: String, factory: String },

    #[error("Factory '{factory}' already registered in family '{family}'")]
    DuplicateFactory { family: String, factory: String },

    #[error("Cyclic facility reference: {chain}")]
    CyclicFacility { chain: String },

    #[error("Component '{component}' does not provide capability '{capability}'")]
    Capability {
        component: String,
        capability: &'static str,
    },

    #[error("Component '{component}' has no {location} {category} field '{field}'")]
    UnknownField {
        component: String,
        location: &'static str,
        category: &'static str,
        field: String,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

impl GfError {
    pub fn validation(property: impl Into<String>, source: ValidationError) -> Self {
        GfError::Validation {
            property: property.into(),
            source,
        }
    }

    pub fn kernel(component: impl Into<String>, err: KernelError) -> Self {
        GfError::KernelBinding {
            component: component.into(),
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_property() {
        let err = GfError::validation("filename", ValidationError::NotSpecified);
        let msg = err.to_string();
        assert!(msg.contains("filename"));
        assert!(msg.contains("not specified"));
    }

    #[test]
    fn lifecycle_display_mentions_state() {
        let err = GfError::Lifecycle {
            component: "meshiopetsc".to_string(),
            operation: "preinitialize",
            state: LifecycleState::Preinitialized,
        };
        assert!(err.to_string().contains("preinitialized"));
    }

    #[test]
    fn kernel_error_keeps_message() {
        let err = GfError::kernel("mesher", KernelError::new("bad header"));
        assert_eq!(
            err,
            GfError::KernelBinding {
                component: "mesher".to_string(),
                message: "bad header".to_string()
            }
        );
    }
}
