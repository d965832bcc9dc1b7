use crate::GfError;

/// Reject NaN and infinities, naming the quantity in the error.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, GfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GfError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite(2.5e17, "viscosity").unwrap(), 2.5e17);
        assert_eq!(ensure_finite(-1.0, "density").unwrap(), -1.0);
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "viscosity").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("viscosity"));
        assert!(ensure_finite(f64::INFINITY, "vs").is_err());
    }
}
