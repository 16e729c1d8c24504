//! Utilidades de validación
//!
//! Validadores custom para los DTOs (usados vía `#[validate(custom = ...)]`).

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar que un decimal sea estrictamente positivo
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("must be positive".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío (solo espacios cuenta como vacío)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Limitar el parámetro `limit` de listados recientes
pub fn clamp_limit(requested: Option<i64>, max: i64) -> i64 {
    requested.unwrap_or(max).clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_decimal() {
        assert!(validate_positive_decimal(&Decimal::new(1, 2)).is_ok());
        assert!(validate_positive_decimal(&Decimal::ZERO).is_err());
        assert!(validate_positive_decimal(&Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Daily driver").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(10), 50), 10);
        assert_eq!(clamp_limit(Some(500), 50), 50);
        assert_eq!(clamp_limit(Some(0), 50), 1);
    }
}
