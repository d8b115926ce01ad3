//! Replace identifying columns with salted ids.

use polars::prelude::*;
use pseudo_core::{HashError, Salt, USER_ID_HEX_LEN, digest, user_id};

use crate::error::{ConvertError, Result};

/// Returns a copy of `df` with `column` replaced by pseudonymous ids.
///
/// String cells are treated as usernames and mapped with [`user_id`], so the
/// ids match the ones issued elsewhere for the same user. Binary cells are
/// hashed as-is and cut to the same length. Nulls stay null. Any other column
/// type is rejected with [`HashError::TypeMismatch`].
pub fn pseudonymize_column(df: &DataFrame, column: &str, salt: &Salt) -> Result<DataFrame> {
    let source = df.column(column)?;
    if !matches!(source.dtype(), DataType::String | DataType::Binary) {
        return Err(ConvertError::Pseudonymize {
            column: column.to_string(),
            source: HashError::TypeMismatch {
                found: source.dtype().to_string(),
            },
        });
    }

    let series = source.as_materialized_series();
    let ids: Vec<Option<String>> = match series.dtype() {
        DataType::Binary => series
            .binary()?
            .iter()
            .map(|value| value.map(|bytes| digest(bytes, salt).short_hex(USER_ID_HEX_LEN)))
            .collect(),
        _ => series
            .str()?
            .iter()
            .map(|value| value.map(|name| user_id(name, salt)))
            .collect(),
    };

    let mut result = df.clone();
    result.with_column(Series::new(column.into(), ids))?;

    tracing::debug!(column, rows = result.height(), "pseudonymized column");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_salt() -> Salt {
        Salt::from_hex("a1b2c3d4e5f60718").unwrap()
    }

    #[test]
    fn test_string_column_keeps_nulls() {
        let df = DataFrame::new(vec![
            Series::new("user".into(), vec![Some("GORLINS"), None]).into_column(),
        ])
        .unwrap();

        let hashed = pseudonymize_column(&df, "user", &test_salt()).unwrap();

        let ids: Vec<Option<&str>> = hashed.column("user").unwrap().str().unwrap().iter().collect();
        assert_eq!(ids, vec![Some("675f4ccc"), None]);
    }

    #[test]
    fn test_binary_column_hashes_raw_bytes() {
        let raw: &[u8] = &[0x00, 0x01];
        let df = DataFrame::new(vec![
            Series::new("raw".into(), vec![Some(raw), None]).into_column(),
        ])
        .unwrap();

        let hashed = pseudonymize_column(&df, "raw", &test_salt()).unwrap();

        let ids: Vec<Option<&str>> = hashed.column("raw").unwrap().str().unwrap().iter().collect();
        let expected = digest(raw, &test_salt()).short_hex(USER_ID_HEX_LEN);
        assert_eq!(ids, vec![Some(expected.as_str()), None]);
    }

    #[test]
    fn test_missing_column() {
        let df = DataFrame::new(vec![Series::new("a".into(), vec![1i64]).into_column()]).unwrap();
        assert!(pseudonymize_column(&df, "user", &test_salt()).is_err());
    }
}
