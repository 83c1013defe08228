//! Decimal-point to decimal-comma rewriting.
//!
//! Fields are rewritten on their literal text, never re-serialized from a
//! parsed float, so trailing zeros, exponent casing and surrounding
//! whitespace survive untouched:
//!
//! - `"3.55"` -> `"3,55"`
//! - `"1.2E10"` -> `"1,2E10"`
//! - `"1.500"` -> `"1,500"`
//! - `"42"`, `"abc"`, `"1e5"` are left alone
//!
//! The rewrite is not idempotent in general: `"3,55"` no longer parses as a
//! float, so a second pass leaves it alone, but that holds only because the
//! comma form is not a valid float literal.

use std::borrow::Cow;

use csv::StringRecord;

/// Returns true if `text` is a floating-point literal.
///
/// Accepts surrounding whitespace, an optional sign, mantissas like `1.`,
/// `.5` and `1.5`, an `e`/`E` exponent, `inf`/`infinity`/`nan` in any case,
/// and single `_` separators between digits.
pub fn parses_as_float(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return false;
    }

    if !trimmed.contains('_') {
        return trimmed.parse::<f64>().is_ok();
    }

    strip_digit_separators(trimmed).is_some_and(|cleaned| cleaned.parse::<f64>().is_ok())
}

/// Rewrites `.` to `,` in a field that parses as a decimal float literal.
///
/// Fields that are not floats come back borrowed and unchanged. An
/// exponent-only literal such as `1e5` has no `.` to swap and is also
/// returned as-is.
pub fn to_comma_decimal(field: &str) -> Cow<'_, str> {
    if field.contains('.') && parses_as_float(field) {
        Cow::Owned(field.replace('.', ","))
    } else {
        Cow::Borrowed(field)
    }
}

/// Applies [`to_comma_decimal`] to every field of a row.
///
/// Returns the rewritten row and the number of fields that changed. Arity is
/// preserved.
pub fn transform_row(record: &StringRecord) -> (StringRecord, usize) {
    let mut rewritten = 0usize;
    let mut out = StringRecord::with_capacity(record.as_slice().len(), record.len());

    for field in record {
        let value = to_comma_decimal(field);
        if matches!(value, Cow::Owned(_)) {
            rewritten += 1;
        }
        out.push_field(&value);
    }

    (out, rewritten)
}

/// Removes `_` digit separators, rejecting any `_` not between two digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut cleaned = String::with_capacity(text.len());

    for (idx, ch) in text.char_indices() {
        if ch != '_' {
            cleaned.push(ch);
            continue;
        }
        let before = idx.checked_sub(1).map(|prev| bytes[prev]);
        let after = bytes.get(idx + 1).copied();
        let between_digits = before.is_some_and(|b| b.is_ascii_digit())
            && after.is_some_and(|b| b.is_ascii_digit());
        if !between_digits {
            return None;
        }
    }

    Some(cleaned)
}
