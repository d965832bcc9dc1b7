//! Property declarations and the per-component inventory.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::error::{GfError, GfResult, ValidationError};
use crate::value::{PropertyValue, SemanticType};

/// Validator attached to a property declaration.
pub type Validator = fn(PropertyValue) -> Result<PropertyValue, ValidationError>;

/// Metadata for one configurable attribute of a component.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    name: &'static str,
    ty: SemanticType,
    default: Option<PropertyValue>,
    validator: Option<Validator>,
    tip: &'static str,
}

impl PropertyDecl {
    /// A property of type `ty` with no default; it must be supplied.
    pub fn required(name: &'static str, ty: SemanticType) -> Self {
        Self {
            name,
            ty,
            default: None,
            validator: None,
            tip: "",
        }
    }

    pub fn bool(name: &'static str, default: bool) -> Self {
        Self::required(name, SemanticType::Bool).with_default(default)
    }

    pub fn int(name: &'static str, default: i64) -> Self {
        Self::required(name, SemanticType::Int).with_default(default)
    }

    pub fn real(name: &'static str, default: f64) -> Self {
        Self::required(name, SemanticType::Real).with_default(default)
    }

    pub fn string(name: &'static str, default: &str) -> Self {
        Self::required(name, SemanticType::Str).with_default(default)
    }

    pub fn choice(name: &'static str, choices: &'static [&'static str], default: &str) -> Self {
        Self::required(name, SemanticType::Choice(choices)).with_default(default)
    }

    /// A facility selected from `family`; `default_factory` is used when no
    /// override is configured.
    pub fn facility(
        name: &'static str,
        family: &'static str,
        default_factory: &'static str,
    ) -> Self {
        Self::required(
            name,
            SemanticType::Facility {
                family,
                default_factory,
            },
        )
    }

    pub fn with_default(mut self, default: impl Into<PropertyValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_tip(mut self, tip: &'static str) -> Self {
        self.tip = tip;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> SemanticType {
        self.ty
    }

    pub fn default_value(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    pub fn tip(&self) -> &'static str {
        self.tip
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Type-check `raw` and run it through the validator, if any.
    ///
    /// Failures are reported against this property's name.
    pub fn accept(&self, raw: PropertyValue) -> GfResult<PropertyValue> {
        let typed = self
            .ty
            .coerce(raw)
            .map_err(|e| GfError::validation(self.name, e))?;
        match self.validator {
            Some(validate) => validate(typed).map_err(|e| GfError::validation(self.name, e)),
            None => Ok(typed),
        }
    }
}

/// The declaration set of one component type. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    decls: Vec<PropertyDecl>,
}

impl Inventory {
    pub fn new(decls: Vec<PropertyDecl>) -> GfResult<Self> {
        Self::default().extend(decls)
    }

    /// Add declarations, e.g. a variant's on top of its family's common ones.
    pub fn extend(mut self, decls: Vec<PropertyDecl>) -> GfResult<Self> {
        let mut seen: HashSet<&'static str> = self.decls.iter().map(|d| d.name).collect();
        for decl in &decls {
            if !seen.insert(decl.name) {
                return Err(GfError::DuplicateProperty {
                    property: decl.name.to_string(),
                });
            }
        }
        self.decls.extend(decls);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.decls.iter()
    }

    pub fn facilities(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.decls.iter().filter(|d| d.ty.is_facility())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Scalar values bound to their declared defaults.
    pub fn defaults(&self) -> PropertyValues {
        let mut values = PropertyValues::default();
        for decl in &self.decls {
            if let Some(default) = &decl.default {
                values.insert(decl.name, default.clone());
            }
        }
        values
    }
}

/// Current scalar values of a component, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValues {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyValues {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.values.insert(name.into(), value);
    }

    /// Overlay `other`; its entries win.
    pub fn merge(&mut self, other: PropertyValues) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_positive;

    #[test]
    fn duplicate_names_rejected() {
        let err = Inventory::new(vec![
            PropertyDecl::string("label", ""),
            PropertyDecl::int("label", 0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GfError::DuplicateProperty {
                property: "label".to_string()
            }
        );
    }

    #[test]
    fn extend_checks_against_existing() {
        let base = Inventory::new(vec![PropertyDecl::int("id", 0)]).unwrap();
        assert!(base.clone().extend(vec![PropertyDecl::int("id", 1)]).is_err());
        let both = base.extend(vec![PropertyDecl::bool("debug", false)]).unwrap();
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn defaults_skip_required_and_facilities() {
        let inv = Inventory::new(vec![
            PropertyDecl::string("filename", ""),
            PropertyDecl::required("data", SemanticType::RealList),
            PropertyDecl::facility("coordsys", "coordsys", "cscart"),
        ])
        .unwrap();
        let defaults = inv.defaults();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("filename"), Some(&PropertyValue::from("")));
        assert_eq!(inv.facilities().count(), 1);
    }

    #[test]
    fn accept_runs_type_check_then_validator() {
        let decl = PropertyDecl::real("density", 1.0).with_validator(validate_positive);
        assert_eq!(decl.accept(PropertyValue::Int(2)), Ok(PropertyValue::Real(2.0)));

        let err = decl.accept(PropertyValue::Real(-1.0)).unwrap_err();
        assert!(matches!(err, GfError::Validation { ref property, .. } if property == "density"));

        let err = decl.accept("dense".into()).unwrap_err();
        assert!(matches!(
            err,
            GfError::Validation {
                source: ValidationError::WrongType { .. },
                ..
            }
        ));
    }

    #[test]
    fn merge_overwrites() {
        let mut a = PropertyValues::default();
        a.insert("x", 1.0.into());
        a.insert("y", 2.0.into());
        let mut b = PropertyValues::default();
        b.insert("y", 3.0.into());
        a.merge(b);
        assert_eq!(a.get("x"), Some(&PropertyValue::Real(1.0)));
        assert_eq!(a.get("y"), Some(&PropertyValue::Real(3.0)));
    }
}
