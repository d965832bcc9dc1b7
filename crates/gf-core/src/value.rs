//! Property values and the semantic types they are checked against.

use core::fmt;

use crate::error::ValidationError;

/// A configuration value after it has left the project file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    StrList(Vec<String>),
    RealList(Vec<f64>),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::StrList(_) => "string list",
            Self::RealList(_) => "real list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            Self::StrList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_real_list(&self) -> Option<&[f64]> {
        match self {
            Self::RealList(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::StrList(v) => write!(f, "[{}]", v.join(", ")),
            Self::RealList(v) => {
                let items: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(v: Vec<String>) -> Self {
        Self::StrList(v)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::RealList(v)
    }
}

/// What a declared property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Bool,
    Int,
    Real,
    Str,
    /// A string restricted to a fixed set of choices.
    Choice(&'static [&'static str]),
    StrList,
    RealList,
    /// Another component, selected from `family` by factory name.
    Facility {
        family: &'static str,
        default_factory: &'static str,
    },
}

impl SemanticType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Real => "real",
            Self::Str => "string",
            Self::Choice(_) => "choice",
            Self::StrList => "string list",
            Self::RealList => "real list",
            Self::Facility { .. } => "facility",
        }
    }

    pub fn is_facility(&self) -> bool {
        matches!(self, Self::Facility { .. })
    }

    /// Check `value` against this type, widening where it is lossless
    /// (int to real, empty list to either list type).
    pub fn coerce(&self, value: PropertyValue) -> Result<PropertyValue, ValidationError> {
        use PropertyValue as V;

        match (self, value) {
            (Self::Bool, v @ V::Bool(_)) => Ok(v),
            (Self::Int, v @ V::Int(_)) => Ok(v),
            (Self::Real, V::Int(i)) => Ok(V::Real(i as f64)),
            (Self::Real, V::Real(r)) => {
                if r.is_finite() {
                    Ok(V::Real(r))
                } else {
                    Err(ValidationError::NonFinite { value: r })
                }
            }
            (Self::Str, v @ V::Str(_)) => Ok(v),
            (Self::Choice(choices), V::Str(s)) => {
                if choices.contains(&s.as_str()) {
                    Ok(V::Str(s))
                } else {
                    Err(ValidationError::NotInChoices {
                        value: s,
                        choices: choices.join(", "),
                    })
                }
            }
            (Self::StrList, v @ V::StrList(_)) => Ok(v),
            (Self::StrList, V::RealList(v)) if v.is_empty() => Ok(V::StrList(Vec::new())),
            (Self::RealList, V::RealList(v)) => {
                match v.iter().find(|x| !x.is_finite()) {
                    Some(bad) => Err(ValidationError::NonFinite { value: *bad }),
                    None => Ok(V::RealList(v)),
                }
            }
            (Self::RealList, V::StrList(v)) if v.is_empty() => Ok(V::RealList(Vec::new())),
            (expected, found) => Err(ValidationError::WrongType {
                expected: expected.name(),
                found: found.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widens_to_real() {
        assert_eq!(
            SemanticType::Real.coerce(PropertyValue::Int(3)),
            Ok(PropertyValue::Real(3.0))
        );
    }

    #[test]
    fn real_does_not_narrow_to_int() {
        let err = SemanticType::Int.coerce(PropertyValue::Real(3.5)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                expected: "int",
                found: "real"
            }
        );
    }

    #[test]
    fn choice_rejects_unknown() {
        let units = SemanticType::Choice(&["m", "km"]);
        assert!(units.coerce("km".into()).is_ok());
        let err = units.coerce("mi".into()).unwrap_err();
        assert!(err.to_string().contains("m, km"));
    }

    #[test]
    fn empty_lists_fit_either_list_type() {
        assert_eq!(
            SemanticType::RealList.coerce(PropertyValue::StrList(vec![])),
            Ok(PropertyValue::RealList(vec![]))
        );
        assert!(
            SemanticType::RealList
                .coerce(PropertyValue::StrList(vec!["a".into()]))
                .is_err()
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            SemanticType::Real.coerce(PropertyValue::Real(f64::NAN)),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn display_quotes_strings() {
        assert_eq!(PropertyValue::from("a.msh").to_string(), "\"a.msh\"");
        assert_eq!(PropertyValue::from(vec![1.0, 2.5]).to_string(), "[1, 2.5]");
    }
}
