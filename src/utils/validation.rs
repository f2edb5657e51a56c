use crate::utils::error::{LbasiError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LbasiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LbasiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LbasiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_min_items<T>(field_name: &str, items: &[T], min_items: usize) -> Result<()> {
    if items.len() < min_items {
        return Err(LbasiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: items.len().to_string(),
            reason: format!("At least {} item(s) required", min_items),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LbasiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("products_file", "products.txt").is_ok());
        assert!(validate_path("products_file", "").is_err());
        assert!(validate_path("products_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("keywords.trigger", "레티놀").is_ok());
        assert!(validate_non_empty_string("keywords.trigger", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("level", 3u32, 1, 5).is_ok());
        assert!(validate_range("level", 0u32, 1, 5).is_err());
        assert!(validate_range("level", 6u32, 1, 5).is_err());
    }

    #[test]
    fn test_validate_min_items() {
        assert!(validate_min_items("questions[0].options", &["a"], 1).is_ok());
        let empty: [&str; 0] = [];
        assert!(validate_min_items("questions[0].options", &empty, 1).is_err());
    }
}
