/// Errors from parsing user-entered text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{field} is required")]
    Empty { field: &'static str },
    #[error("{field}: {text:?} is not a number")]
    NotANumber { field: &'static str, text: String },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("unknown force {0:?} (expected weight1, weight2 or reaction)")]
    UnknownForce(String),
    #[error("unknown drop target {0:?} (expected pos1, pos2 or fulcrum)")]
    UnknownTarget(String),
    #[error("{0:?} is not a ruler tick")]
    InvalidTick(String),
    #[error("{0:?} is not a coin id")]
    InvalidCoinId(String),
}

/// Parse a numeric form field. Surrounding whitespace is ignored; empty,
/// non-numeric and non-finite values are rejected.
pub fn parse_quantity(field: &'static str, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        field,
        text: trimmed.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    Ok(value)
}
