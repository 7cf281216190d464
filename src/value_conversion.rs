//! SeaQuery `Value` to PostgreSQL bind parameter conversion.
//!
//! Values are first collected into typed vectors, then borrowed as `ToSql`
//! trait objects, so the references stay valid for the closure call. NULLs
//! bind as a typed `None` of the variant's column type.

use crate::error::QueryError;
use postgres_types::ToSql;
use sea_query::Value;

/// Convert `values` to `ToSql` parameters and run `f` with them.
///
/// # Errors
///
/// Returns `QueryError::UnsupportedValue` for value types without a
/// PostgreSQL mapping here, or an unsigned value above `i64::MAX`.
pub(crate) fn with_converted_params<F, R>(values: &[Value], f: F) -> Result<R, QueryError>
where
    F: FnOnce(&[&(dyn ToSql + Sync)]) -> Result<R, QueryError>,
{
    let mut bools: Vec<bool> = Vec::new();
    let mut ints: Vec<i32> = Vec::new();
    let mut big_ints: Vec<i64> = Vec::new();
    let mut strings: Vec<String> = Vec::new();
    let mut bytes: Vec<Vec<u8>> = Vec::new();
    let mut floats: Vec<f32> = Vec::new();
    let mut doubles: Vec<f64> = Vec::new();

    // First pass: collect all values into typed vectors
    for value in values {
        match value {
            Value::Bool(Some(b)) => bools.push(*b),
            Value::TinyInt(Some(i)) => ints.push(i32::from(*i)),
            Value::SmallInt(Some(i)) => ints.push(i32::from(*i)),
            Value::Int(Some(i)) => ints.push(*i),
            Value::TinyUnsigned(Some(u)) => ints.push(i32::from(*u)),
            Value::SmallUnsigned(Some(u)) => ints.push(i32::from(*u)),
            Value::BigInt(Some(i)) => big_ints.push(*i),
            Value::Unsigned(Some(u)) => big_ints.push(i64::from(*u)),
            Value::BigUnsigned(Some(u)) => {
                let v = i64::try_from(*u).map_err(|_| {
                    QueryError::UnsupportedValue(format!(
                        "BigUnsigned value {u} exceeds i64::MAX ({})",
                        i64::MAX
                    ))
                })?;
                big_ints.push(v);
            }
            Value::Float(Some(f)) => floats.push(*f),
            Value::Double(Some(d)) => doubles.push(*d),
            Value::String(Some(s)) => strings.push(s.clone()),
            Value::Bytes(Some(b)) => bytes.push(b.clone()),
            Value::Json(Some(j)) => {
                strings.push(serde_json::to_string(&**j).map_err(|e| {
                    QueryError::UnsupportedValue(format!("failed to serialize JSON: {e}"))
                })?);
            }
            v if null_param(v).is_some() => {}
            other => {
                return Err(QueryError::UnsupportedValue(format!("{other:?}")));
            }
        }
    }

    // Second pass: borrow the stored values in the original order
    let mut bool_iter = bools.iter();
    let mut int_iter = ints.iter();
    let mut big_int_iter = big_ints.iter();
    let mut string_iter = strings.iter();
    let mut byte_iter = bytes.iter();
    let mut float_iter = floats.iter();
    let mut double_iter = doubles.iter();

    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(values.len());
    for value in values {
        let param: Option<&(dyn ToSql + Sync)> = match value {
            Value::Bool(Some(_)) => bool_iter.next().map(as_param),
            Value::TinyInt(Some(_))
            | Value::SmallInt(Some(_))
            | Value::Int(Some(_))
            | Value::TinyUnsigned(Some(_))
            | Value::SmallUnsigned(Some(_)) => int_iter.next().map(as_param),
            Value::BigInt(Some(_)) | Value::Unsigned(Some(_)) | Value::BigUnsigned(Some(_)) => {
                big_int_iter.next().map(as_param)
            }
            Value::Float(Some(_)) => float_iter.next().map(as_param),
            Value::Double(Some(_)) => double_iter.next().map(as_param),
            Value::String(Some(_)) | Value::Json(Some(_)) => string_iter.next().map(as_param),
            Value::Bytes(Some(_)) => byte_iter.next().map(as_param),
            _ => null_param(value),
        };
        match param {
            Some(p) => params.push(p),
            None => {
                return Err(QueryError::UnsupportedValue(format!(
                    "bind value {value:?} lost during conversion"
                )))
            }
        }
    }

    f(&params)
}

fn as_param<T: ToSql + Sync>(value: &T) -> &(dyn ToSql + Sync) {
    value
}

static NULL_BOOL: Option<bool> = None;
static NULL_INT: Option<i32> = None;
static NULL_BIG_INT: Option<i64> = None;
static NULL_FLOAT: Option<f32> = None;
static NULL_DOUBLE: Option<f64> = None;
static NULL_TEXT: Option<String> = None;
static NULL_BYTES: Option<Vec<u8>> = None;

/// Typed NULL parameter for a `None` value, `None` for anything else
///
/// Widening follows the non-null mapping, so a NULL binds to the same
/// PostgreSQL type as a present value of that variant.
fn null_param(value: &Value) -> Option<&'static (dyn ToSql + Sync)> {
    let param: &'static (dyn ToSql + Sync) = match value {
        Value::Bool(None) => &NULL_BOOL,
        Value::TinyInt(None)
        | Value::SmallInt(None)
        | Value::Int(None)
        | Value::TinyUnsigned(None)
        | Value::SmallUnsigned(None) => &NULL_INT,
        Value::BigInt(None) | Value::Unsigned(None) | Value::BigUnsigned(None) => &NULL_BIG_INT,
        Value::Float(None) => &NULL_FLOAT,
        Value::Double(None) => &NULL_DOUBLE,
        Value::String(None) | Value::Json(None) => &NULL_TEXT,
        Value::Bytes(None) => &NULL_BYTES,
        _ => return None,
    };
    Some(param)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_params(values: &[Value]) -> Result<Vec<String>, QueryError> {
        with_converted_params(values, |params| {
            Ok(params.iter().map(|p| format!("{p:?}")).collect())
        })
    }

    #[test]
    fn test_order_preserved_across_types() {
        let params = debug_params(&[
            Value::BigInt(Some(7)),
            Value::String(Some("abc".to_string())),
            Value::Int(Some(3)),
            Value::BigInt(Some(9)),
            Value::Bool(Some(true)),
        ])
        .unwrap();

        assert_eq!(params, vec!["7", "\"abc\"", "3", "9", "true"]);
    }

    #[test]
    fn test_nulls() {
        let params = debug_params(&[Value::BigInt(None), Value::String(None)]).unwrap();
        assert_eq!(params, vec!["None", "None"]);
    }

    #[test]
    fn test_nulls_bind_with_column_type() {
        with_converted_params(
            &[
                Value::BigInt(None),
                Value::String(None),
                Value::Int(None),
                Value::Bool(None),
                Value::Bytes(None),
            ],
            |params| {
                assert!(std::ptr::addr_eq(params[0], &NULL_BIG_INT));
                assert!(std::ptr::addr_eq(params[1], &NULL_TEXT));
                assert!(std::ptr::addr_eq(params[2], &NULL_INT));
                assert!(std::ptr::addr_eq(params[3], &NULL_BOOL));
                assert!(std::ptr::addr_eq(params[4], &NULL_BYTES));
                Ok(())
            },
        )
        .unwrap();
    }

    #[test]
    fn test_null_param_ignores_present_values() {
        assert!(null_param(&Value::BigInt(Some(1))).is_none());
        assert!(std::ptr::addr_eq(
            null_param(&Value::Unsigned(None)).unwrap(),
            &NULL_BIG_INT
        ));
        assert!(std::ptr::addr_eq(
            null_param(&Value::Json(None)).unwrap(),
            &NULL_TEXT
        ));
    }

    #[test]
    fn test_small_ints_widen() {
        let params = debug_params(&[Value::SmallInt(Some(-2)), Value::Unsigned(Some(5))]).unwrap();
        assert_eq!(params, vec!["-2", "5"]);
    }

    #[test]
    fn test_big_unsigned_overflow() {
        let err = debug_params(&[Value::BigUnsigned(Some(u64::MAX))]).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedValue(_)));
    }

    #[test]
    fn test_empty() {
        assert!(debug_params(&[]).unwrap().is_empty());
    }
}
