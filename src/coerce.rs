use crate::error::NamelistError;
use crate::lexer::{MULTIPLIER, STRING_COMMA, restore_token};
use crate::schema::ScalarType;

pub(crate) const TRUE_LITERAL: &str = ".TRUE.";
pub(crate) const FALSE_LITERAL: &str = ".FALSE.";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Str(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

// values are shown the way they are written in a namelist file
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(true) => f.write_str(TRUE_LITERAL),
            Value::Bool(false) => f.write_str(FALSE_LITERAL),
        }
    }
}

/// The coerced values of one assignment
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValueList {
    /// at most `limit` leading values of the list
    pub(crate) values: Vec<Value>,
    /// number of values the list holds, including the ones beyond the limit
    pub(crate) total: usize,
}

impl ValueList {
    /// number of values that were dropped because they did not fit
    pub(crate) fn trimmed(&self) -> usize {
        self.total - self.values.len()
    }
}

/// Coerce the right hand side of an assignment into a list of values.
/// The value list always ends with a comma; the empty piece after it is not a value.
///
/// Only the first `limit` values are kept. Every token is still checked, and the
/// values beyond the limit are counted in `total`.
pub(crate) fn coerce_value_list(
    rhs: &str,
    scalar_type: ScalarType,
    limit: usize,
) -> Result<ValueList, NamelistError> {
    let rhs = rhs.strip_suffix(',').unwrap_or(rhs);
    let mut list = ValueList {
        values: Vec::new(),
        total: 0,
    };
    if rhs.is_empty() {
        return Ok(list);
    }
    for token in rhs.split(',') {
        expand_token(token, scalar_type, limit, &mut list)?;
    }
    Ok(list)
}

/// Coerce one token, expanding the `<count>*<value>` repetition syntax
fn expand_token(
    token: &str,
    scalar_type: ScalarType,
    limit: usize,
    list: &mut ValueList,
) -> Result<(), NamelistError> {
    let (count, value) = if let Some((count_str, value_str)) = token.split_once(MULTIPLIER) {
        let count: usize =
            count_str
                .parse()
                .map_err(|_| NamelistError::InvalidMultiplier {
                    token: restore_token(token),
                })?;
        (count, coerce_value(value_str, scalar_type)?)
    } else {
        (1, coerce_value(token, scalar_type)?)
    };

    let room = limit.saturating_sub(list.values.len());
    list.values.extend(std::iter::repeat_n(value, count.min(room)));
    list.total = list.total.saturating_add(count);
    Ok(())
}

/// Coerce a single value token into the declared scalar type
pub(crate) fn coerce_value(token: &str, scalar_type: ScalarType) -> Result<Value, NamelistError> {
    match scalar_type {
        ScalarType::Str { max_len } => {
            let quote = char::from(crate::lexer::QUOTE);
            if token.len() < 2 || !token.starts_with(quote) || !token.ends_with(quote) {
                return Err(NamelistError::UnterminatedString {
                    token: restore_token(token),
                });
            }
            let text = token[1..token.len() - 1]
                .replace("''", "'")
                .replace(STRING_COMMA, ",");
            if text.chars().count() > max_len {
                return Err(NamelistError::LengthExceeded {
                    token: restore_token(token),
                    max_len,
                });
            }
            Ok(Value::Str(text))
        }
        ScalarType::Float => {
            // FORTRAN double precision literals may use D as the exponent marker
            token
                .replace('D', "E")
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| NamelistError::InvalidNumber {
                    token: restore_token(token),
                    expected: scalar_type.name(),
                })
        }
        ScalarType::Integer => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| NamelistError::InvalidNumber {
                token: restore_token(token),
                expected: scalar_type.name(),
            }),
        ScalarType::Boolean => match token {
            TRUE_LITERAL => Ok(Value::Bool(true)),
            FALSE_LITERAL => Ok(Value::Bool(false)),
            _ => Err(NamelistError::InvalidBoolean {
                token: restore_token(token),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const C10: ScalarType = ScalarType::Str { max_len: 10 };

    #[test]
    fn strings() {
        assert_eq!(
            coerce_value("'VELOC'", C10).unwrap(),
            Value::Str("VELOC".to_string())
        );
        assert_eq!(coerce_value("''", C10).unwrap(), Value::Str(String::new()));
        assert_eq!(
            coerce_value("'Ac B'", C10).unwrap(),
            Value::Str("A, B".to_string())
        );
        assert_eq!(
            coerce_value("'IT''S'", C10).unwrap(),
            Value::Str("IT'S".to_string())
        );
        // exactly at the limit
        assert!(coerce_value("'0123456789'", C10).is_ok());
        let err = coerce_value("'0123456789A'", C10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthExceeded);
    }

    #[test]
    fn unterminated_strings() {
        for token in ["'ABC", "ABC'", "ABC", "'", "", "5"] {
            let err = coerce_value(token, C10).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnterminatedString, "token {token}");
        }
        let err = coerce_value("'Ac", C10).unwrap_err();
        assert!(err.to_string().contains("'A,"));
    }

    #[test]
    fn floats() {
        assert_eq!(
            coerce_value("100.5", ScalarType::Float).unwrap(),
            Value::Float(100.5)
        );
        assert_eq!(
            coerce_value("-2.5E3", ScalarType::Float).unwrap(),
            Value::Float(-2500.0)
        );
        assert_eq!(
            coerce_value("1.5D3", ScalarType::Float).unwrap(),
            Value::Float(1500.0)
        );
        assert_eq!(coerce_value("7", ScalarType::Float).unwrap(), Value::Float(7.0));
        for token in ["ABC", "", "1.0.0", "'1.0'"] {
            let err = coerce_value(token, ScalarType::Float).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidNumber, "token {token}");
        }
    }

    #[test]
    fn integers() {
        assert_eq!(coerce_value("42", ScalarType::Integer).unwrap(), Value::Int(42));
        assert_eq!(coerce_value("-3", ScalarType::Integer).unwrap(), Value::Int(-3));
        for token in ["4.5", "X", ""] {
            let err = coerce_value(token, ScalarType::Integer).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidNumber, "token {token}");
        }
    }

    #[test]
    fn booleans() {
        assert_eq!(
            coerce_value(".TRUE.", ScalarType::Boolean).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            coerce_value(".FALSE.", ScalarType::Boolean).unwrap(),
            Value::Bool(false)
        );
        for token in ["T", "TRUE", ".T.", "1"] {
            let err = coerce_value(token, ScalarType::Boolean).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidBoolean, "token {token}");
        }
    }

    #[test]
    fn multiplier_expansion() {
        let list = coerce_value_list("5x'ABC',", C10, usize::MAX).unwrap();
        assert_eq!(list.values, vec![Value::Str("ABC".to_string()); 5]);
        assert_eq!(list.trimmed(), 0);

        let list = coerce_value_list("1,2x3,4,", ScalarType::Integer, usize::MAX).unwrap();
        assert_eq!(
            list.values,
            vec![Value::Int(1), Value::Int(3), Value::Int(3), Value::Int(4)]
        );

        let list = coerce_value_list("0x1.0,", ScalarType::Float, usize::MAX).unwrap();
        assert!(list.values.is_empty());
        assert_eq!(list.total, 0);

        let err = coerce_value_list("Ax1.0,", ScalarType::Float, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMultiplier);
        assert!(err.to_string().contains("A*1.0"));

        let err = coerce_value_list("2xABC,", ScalarType::Float, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn values_beyond_limit_are_counted_not_stored() {
        let list = coerce_value_list("1,2x3,4,", ScalarType::Integer, 2).unwrap();
        assert_eq!(list.values, vec![Value::Int(1), Value::Int(3)]);
        assert_eq!(list.total, 4);
        assert_eq!(list.trimmed(), 2);

        // a repetition count far above any capacity must not be materialized
        let list = coerce_value_list("1000000000000000x1.0,", ScalarType::Float, 1).unwrap();
        assert_eq!(list.values, vec![Value::Float(1.0)]);
        assert_eq!(list.trimmed(), 1_000_000_000_000_000 - 1);

        let list = coerce_value_list(
            &format!("{}x1,{}x2,", usize::MAX, usize::MAX),
            ScalarType::Integer,
            3,
        )
        .unwrap();
        assert_eq!(list.values.len(), 3);
        assert_eq!(list.total, usize::MAX);

        // tokens past the limit are still checked
        let err = coerce_value_list("1,X,", ScalarType::Integer, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn display_as_namelist_literal() {
        assert_eq!(Value::Str("IT'S".to_string()).to_string(), "'IT''S'");
        assert_eq!(Value::Float(100.0).to_string(), "100.0");
        assert_eq!(Value::Float(1.5e-8).to_string(), "1.5e-8");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(false).to_string(), ".FALSE.");
    }

    #[test]
    fn empty_value_list() {
        let list = coerce_value_list(",", ScalarType::Float, usize::MAX).unwrap();
        assert!(list.values.is_empty());
    }

    #[test]
    fn empty_value_in_list() {
        let err = coerce_value_list("1.0,,2.0,", ScalarType::Float, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }
}
