//! Reusable validators.
//!
//! A validator maps a raw value to the accepted value or a
//! [`ValidationError`]. Apart from the read probe in [`validate_filename`]
//! they are pure.

use std::fs::File;

use crate::error::ValidationError;
use crate::value::PropertyValue;

/// Accept a non-empty filename that can be opened for reading.
///
/// The file is opened and immediately closed again; only existence and
/// read permission are checked, never the contents. Directories count as
/// not found.
pub fn validate_filename(value: PropertyValue) -> Result<PropertyValue, ValidationError> {
    let path = match &value {
        PropertyValue::Str(s) => s.as_str(),
        other => {
            return Err(ValidationError::WrongType {
                expected: "string",
                found: other.type_name(),
            });
        }
    };

    if path.is_empty() {
        return Err(ValidationError::NotSpecified);
    }

    let is_file = File::open(path)
        .and_then(|file| file.metadata())
        .is_ok_and(|meta| !meta.is_dir());
    if !is_file {
        return Err(ValidationError::NotFound {
            path: path.to_string(),
        });
    }

    Ok(value)
}

/// Accept any string except the empty one.
pub fn validate_non_empty(value: PropertyValue) -> Result<PropertyValue, ValidationError> {
    match value.as_str() {
        Some("") => Err(ValidationError::NotSpecified),
        _ => Ok(value),
    }
}

/// Accept strictly positive reals.
pub fn validate_positive(value: PropertyValue) -> Result<PropertyValue, ValidationError> {
    match value.as_real() {
        Some(x) if x > 0.0 => Ok(value),
        Some(x) => Err(ValidationError::OutOfRange {
            value: x.to_string(),
            reason: "must be positive",
        }),
        None => Err(ValidationError::WrongType {
            expected: "real",
            found: value.type_name(),
        }),
    }
}

/// Accept integers >= 0.
pub fn validate_non_negative(value: PropertyValue) -> Result<PropertyValue, ValidationError> {
    match value.as_int() {
        Some(i) if i >= 0 => Ok(value),
        Some(i) => Err(ValidationError::OutOfRange {
            value: i.to_string(),
            reason: "must be non-negative",
        }),
        None => Err(ValidationError::WrongType {
            expected: "int",
            found: value.type_name(),
        }),
    }
}

/// Accept spatial dimensions 1, 2 or 3.
pub fn validate_space_dim(value: PropertyValue) -> Result<PropertyValue, ValidationError> {
    match value.as_int() {
        Some(1..=3) => Ok(value),
        Some(i) => Err(ValidationError::OutOfRange {
            value: i.to_string(),
            reason: "spatial dimension must be 1, 2 or 3",
        }),
        None => Err(ValidationError::WrongType {
            expected: "int",
            found: value.type_name(),
        }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn readable_files_are_identity(stem in "[a-z]{1,12}") {
            let path = std::env::temp_dir().join(format!("gf_core_prop_{stem}.msh"));
            std::fs::write(&path, "x").unwrap();
            let raw = PropertyValue::Str(path.to_string_lossy().into_owned());
            let accepted = validate_filename(raw.clone());
            std::fs::remove_file(&path).unwrap();
            prop_assert_eq!(accepted, Ok(raw));
        }

        #[test]
        fn positive_accepts_exactly_positive(x in -1.0e6_f64..1.0e6_f64) {
            prop_assert_eq!(validate_positive(x.into()).is_ok(), x > 0.0);
        }
    }
}
