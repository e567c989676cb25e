//! # Identifier Case Convention
//!
//! Schema paths are built from declared field names (`NestedFieldA`,
//! `nested_field_a`) while data paths come from document keys
//! (`nestedFieldA`). Both are brought to lower camel case so the two path
//! spaces line up.
//!
//! Word boundaries:
//!
//! - `_`, `-` and space separate words and are dropped;
//! - a digit ends a word, so the letter after it is capitalized;
//! - a capital letter following a lowercase letter starts a word;
//! - a run of capitals is one word (`UserID` becomes `userId`).
//!
//! Each dot-separated segment is converted on its own; the wildcard segment
//! passes through untouched.

use crate::path::{SEPARATOR, WILDCARD};

/// Convert an identifier (or dot-joined path) to lower camel case.
pub fn to_camel(input: &str) -> String {
    let input = input.trim();
    if !input.contains(SEPARATOR) {
        return camel_segment(input);
    }
    input
        .split(SEPARATOR)
        .map(camel_segment)
        .collect::<Vec<_>>()
        .join(".")
}

fn camel_segment(segment: &str) -> String {
    if segment == WILDCARD {
        return segment.to_string();
    }

    let mut out = String::with_capacity(segment.len());
    let mut cap_next = false;
    let mut prev_upper = false;

    for ch in segment.chars() {
        let upper = ch.is_uppercase();

        if ch.is_alphabetic() {
            if out.is_empty() {
                out.extend(ch.to_lowercase());
            } else if cap_next {
                out.extend(ch.to_uppercase());
            } else if prev_upper && upper {
                out.extend(ch.to_lowercase());
            } else {
                out.push(ch);
            }
            cap_next = false;
        } else if ch.is_ascii_digit() {
            out.push(ch);
            cap_next = true;
        } else {
            cap_next = !out.is_empty() && matches!(ch, '_' | '-' | ' ');
        }

        prev_upper = upper;
    }

    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Separators never survive conversion.
        #[test]
        fn output_has_no_word_separators(input in "[A-Za-z0-9_ -]{0,40}") {
            let out = to_camel(&input);
            prop_assert!(!out.contains(['_', '-', ' ']), "separator left in {out:?}");
        }

        /// The first character of a converted identifier is never uppercase.
        #[test]
        fn first_letter_is_lowercase(input in "[A-Za-z][A-Za-z0-9_]{0,30}") {
            let out = to_camel(&input);
            let first = out.chars().next();
            prop_assert!(first.map_or(true, |c| !c.is_uppercase()), "got {out:?}");
        }

        /// Conversion only drops separators: alphanumerics are kept in order.
        #[test]
        fn alphanumerics_are_preserved(input in "[A-Za-z0-9_]{0,40}") {
            let expected: String = input
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            prop_assert_eq!(to_camel(&input).to_ascii_lowercase(), expected);
        }
    }
}
