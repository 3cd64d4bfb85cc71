use serde::{Deserialize, Deserializer};

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Deserializes a VATSIM identifier that the API returns either as a JSON number
/// or as a numeric string.
pub fn deserialize_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Number(u64),
        String(String),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(value) => Ok(value),
        StringOrNumber::String(value) => parse_u64_from_string(value).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_u64_from_string_or_number")]
        id: u64,
    }

    #[test]
    fn parses_numeric_string() {
        assert_eq!(parse_u64_from_string("1234567".to_string()).unwrap(), 1234567);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result = parse_u64_from_string("abc".to_string());
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { .. }))
        ));
    }

    #[test]
    fn deserializes_number_and_string_ids() {
        let from_number: Wrapper = serde_json::from_str(r#"{"id": 1234567}"#).unwrap();
        let from_string: Wrapper = serde_json::from_str(r#"{"id": "1234567"}"#).unwrap();

        assert_eq!(from_number.id, 1234567);
        assert_eq!(from_string.id, 1234567);
    }

    #[test]
    fn deserialize_rejects_garbage_string() {
        let result = serde_json::from_str::<Wrapper>(r#"{"id": "not-a-cid"}"#);
        assert!(result.is_err());
    }
}
