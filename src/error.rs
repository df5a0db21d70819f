use std::path::PathBuf;

use thiserror::Error;

/// Failures a pipeline step can report without taking the program down.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input for {field}: '{raw}' is not a number")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: String,
    },

    #[error(
        "missing input: {document} document not found at {}; run the step that produces it first",
        .path.display()
    )]
    MissingInput {
        document: &'static str,
        path: PathBuf,
    },

    #[error(
        "missing input: {document} document at {} is malformed ({reason}); re-run the step that produces it",
        .path.display()
    )]
    MalformedDocument {
        document: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl PipelineError {
    /// True for a prerequisite document that is absent or unreadable as its type.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::MalformedDocument { .. }
        )
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Parses a user-entered number, trimming surrounding whitespace.
pub fn parse_number(field: &'static str, raw: &str) -> PipelineResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PipelineError::InvalidNumber {
            field,
            raw: trimmed.to_string(),
        }),
    }
}

pub fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> PipelineResult<f64> {
    check(field, value, value >= min && value <= max, || {
        format!("between {min} and {max}")
    })
}

pub fn ensure_at_least(field: &'static str, value: f64, min: f64) -> PipelineResult<f64> {
    check(field, value, value >= min, || format!("at least {min}"))
}

pub fn ensure_finite(field: &'static str, value: f64) -> PipelineResult<f64> {
    check(field, value, true, || "a finite number".to_string())
}

fn check(
    field: &'static str,
    value: f64,
    in_range: bool,
    expected: impl FnOnce() -> String,
) -> PipelineResult<f64> {
    if value.is_finite() && in_range {
        Ok(value)
    } else {
        Err(PipelineError::OutOfRange {
            field,
            value,
            expected: expected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_padded_values() {
        assert_eq!(parse_number("waste_volume", " 500 ").unwrap(), 500.0);
        assert_eq!(parse_number("gravity", "0.38").unwrap(), 0.38);
    }

    #[test]
    fn parse_number_rejects_text_and_non_finite() {
        for raw in ["abc", "", "NaN", "inf"] {
            let err = parse_number("temperature", raw).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidNumber { field: "temperature", .. }));
        }
    }

    #[test]
    fn ensure_range_is_inclusive() {
        assert!(ensure_range("energy_level", 0.0, 0.0, 100.0).is_ok());
        assert!(ensure_range("energy_level", 100.0, 0.0, 100.0).is_ok());
        let err = ensure_range("energy_level", 100.5, 0.0, 100.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "energy_level must be between 0 and 100, got 100.5"
        );
    }

    #[test]
    fn lower_bound_and_finiteness_checks() {
        assert!(ensure_at_least("waste_volume", 0.0, 0.0).is_ok());
        assert!(ensure_at_least("waste_volume", -0.1, 0.0).is_err());
        assert!(ensure_finite("gravity", f64::INFINITY).is_err());
        assert!(ensure_finite("gravity", -3.5).is_ok());
    }

    #[test]
    fn malformed_document_counts_as_missing_input() {
        let err = PipelineError::MalformedDocument {
            document: "monitoring",
            path: PathBuf::from("monitoring.json"),
            reason: "missing field `efficiency`".to_string(),
        };
        assert!(err.is_missing_input());
        assert!(err.to_string().starts_with("missing input"));
    }
}
