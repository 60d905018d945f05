use std::error::Error as StdError;

/// The error type a formatter may fail with.
pub type FormatError = Box<dyn StdError + Send + Sync>;

/// An external pretty-printer applied to serialized markup.
///
/// Formatting is best effort: when `format` fails the unformatted markup is
/// returned instead and the failure is logged at `warn` level.
pub trait Formatter {
    fn format(&self, markup: &str) -> Result<String, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, FormatError>,
{
    fn format(&self, markup: &str) -> Result<String, FormatError> {
        self(markup)
    }
}

/// Runs `formatter` over `markup`, keeping the unformatted markup when it fails.
pub(crate) fn format_or_keep(formatter: &dyn Formatter, markup: String) -> String {
    match formatter.format(&markup) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!("pretty-printer failed, keeping unformatted markup: {}", err);
            markup
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_formatter() {
        let upper = |markup: &str| -> Result<String, FormatError> { Ok(markup.to_uppercase()) };
        assert_eq!(format_or_keep(&upper, "<p>".to_string()), "<P>");
    }

    #[test]
    fn test_failing_formatter_keeps_markup() {
        let broken = |_: &str| -> Result<String, FormatError> { Err("tidy is not installed".into()) };
        assert_eq!(format_or_keep(&broken, "<p>".to_string()), "<p>");
    }
}
