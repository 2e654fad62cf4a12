use std::error::Error;

/// Renders an error together with its `source()` chain, joined by `": "`.
///
/// reqwest and hyper keep the interesting part (DNS lookup, connection refused) in the
/// sources, so the top-level `Display` alone is not enough for operators. A source is
/// skipped when the link directly above it already ends with its text, which is how
/// wrappers that print their own cause render.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !cause_message.is_empty() && !previous.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        previous = cause_message;
        source = cause.source();
    }
    message
}
