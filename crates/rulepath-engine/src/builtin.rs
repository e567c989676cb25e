//! # Built-in Rule Handlers
//!
//! The default predicate pack. Each handler dispatches on the JSON type of
//! the value it receives:
//!
//! | Value  | Measured as |
//! |--------|-------------|
//! | string | character count (`eq` compares the text itself) |
//! | array, object | number of entries |
//! | number | its numeric value |
//! | bool   | only `eq`/`ne` apply |
//!
//! A missing or unparseable argument, or a value of a type the rule does not
//! understand, fails the predicate. Handlers never panic.

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use chrono::format::{parse, ParseErrorKind, ParseResult, Parsed, StrftimeItems};
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::registry::RuleHandler;

type Predicate = fn(&Value, &[String]) -> bool;

const BUILTINS: &[(&str, Predicate)] = &[
    ("alphaunicode", alpha_unicode),
    ("boolean", boolean),
    ("contains", contains),
    ("datetime", datetime),
    ("email", email),
    ("eq", eq),
    ("gt", gt),
    ("gte", gte),
    ("http_url", http_url),
    ("jwt", jwt),
    ("len", len),
    ("lt", lt),
    ("lte", lte),
    ("max", lte),
    ("min", gte),
    ("ne", ne),
    ("number", number),
    ("oneof", one_of),
    ("uri", uri),
    ("url", url),
];

/// Every built-in handler with its rule name.
pub fn all() -> Vec<(&'static str, Arc<dyn RuleHandler>)> {
    BUILTINS
        .iter()
        .map(|&(name, predicate)| (name, Arc::new(predicate) as Arc<dyn RuleHandler>))
        .collect()
}

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").expect("number pattern compiles")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

static ALPHA_UNICODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("alpha pattern compiles"));

static JWT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$").expect("jwt pattern compiles")
});

fn first(args: &[String]) -> Option<&str> {
    args.first().map(|a| a.trim())
}

/// Compare the measure of `value` with the numeric argument.
fn measure(value: &Value, arg: &str) -> Option<Ordering> {
    match value {
        Value::String(s) => {
            let want: u64 = arg.parse().ok()?;
            Some((s.chars().count() as u64).cmp(&want))
        }
        Value::Array(items) => {
            let want: u64 = arg.parse().ok()?;
            Some((items.len() as u64).cmp(&want))
        }
        Value::Object(map) => {
            let want: u64 = arg.parse().ok()?;
            Some((map.len() as u64).cmp(&want))
        }
        Value::Number(n) => {
            if let (Some(have), Ok(want)) = (n.as_i64(), arg.parse::<i64>()) {
                return Some(have.cmp(&want));
            }
            if let (Some(have), Ok(want)) = (n.as_u64(), arg.parse::<u64>()) {
                return Some(have.cmp(&want));
            }
            let want: f64 = arg.parse().ok()?;
            n.as_f64()?.partial_cmp(&want)
        }
        Value::Null | Value::Bool(_) => None,
    }
}

fn compare(value: &Value, args: &[String], accept: fn(Ordering) -> bool) -> bool {
    first(args)
        .and_then(|arg| measure(value, arg))
        .is_some_and(accept)
}

fn eq(value: &Value, args: &[String]) -> bool {
    let Some(arg) = args.first() else {
        return false;
    };
    match value {
        Value::String(s) => s == arg,
        Value::Bool(b) => parse_bool(arg.trim()) == Some(*b),
        _ => measure(value, arg.trim()) == Some(Ordering::Equal),
    }
}

fn ne(value: &Value, args: &[String]) -> bool {
    !args.is_empty() && !eq(value, args)
}

fn gt(value: &Value, args: &[String]) -> bool {
    compare(value, args, Ordering::is_gt)
}

fn gte(value: &Value, args: &[String]) -> bool {
    compare(value, args, Ordering::is_ge)
}

fn lt(value: &Value, args: &[String]) -> bool {
    compare(value, args, Ordering::is_lt)
}

fn lte(value: &Value, args: &[String]) -> bool {
    compare(value, args, Ordering::is_le)
}

fn len(value: &Value, args: &[String]) -> bool {
    compare(value, args, Ordering::is_eq)
}

fn one_of(value: &Value, args: &[String]) -> bool {
    let rendered = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => return false,
    };
    args.iter().any(|arg| *arg == rendered)
}

fn contains(value: &Value, args: &[String]) -> bool {
    let Some(needle) = args.first() else {
        return false;
    };
    match value {
        Value::String(s) => s.contains(needle.as_str()),
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(needle.as_str())),
        _ => false,
    }
}

fn number(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => NUMBER_RE.is_match(s),
        _ => false,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn boolean(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => parse_bool(s).is_some(),
        _ => false,
    }
}

fn matches_pattern(value: &Value, re: &Regex) -> bool {
    value.as_str().is_some_and(|s| re.is_match(s))
}

fn email(value: &Value, _args: &[String]) -> bool {
    matches_pattern(value, &EMAIL_RE)
}

fn alpha_unicode(value: &Value, _args: &[String]) -> bool {
    matches_pattern(value, &ALPHA_UNICODE_RE)
}

fn jwt(value: &Value, _args: &[String]) -> bool {
    matches_pattern(value, &JWT_RE)
}

fn parse_url(value: &Value) -> Option<Url> {
    let s = value.as_str()?.to_lowercase();
    if s.is_empty() {
        return None;
    }
    let parsed = Url::parse(&s).ok()?;
    if s.starts_with("file:/") {
        return Some(parsed);
    }
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    let has_fragment = parsed.fragment().is_some_and(|f| !f.is_empty());
    if has_host || has_fragment || parsed.cannot_be_a_base() {
        Some(parsed)
    } else {
        None
    }
}

fn url(value: &Value, _args: &[String]) -> bool {
    parse_url(value).is_some()
}

fn http_url(value: &Value, _args: &[String]) -> bool {
    parse_url(value).is_some_and(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    })
}

fn uri(value: &Value, _args: &[String]) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let s = s.split_once('#').map_or(s, |(before, _)| before);
    if s.is_empty() {
        return false;
    }
    s.starts_with('/') || Url::parse(s).is_ok()
}

fn datetime(value: &Value, args: &[String]) -> bool {
    let (Some(s), Some(format)) = (value.as_str(), args.first()) else {
        return false;
    };
    let mut parsed = Parsed::new();
    if parse(&mut parsed, s, StrftimeItems::new(format)).is_err() {
        return false;
    }
    // Fields the format left out are fine; fields that contradict are not.
    consistent(parsed.to_naive_date()) && consistent(parsed.to_naive_time())
}

fn consistent<T>(resolved: ParseResult<T>) -> bool {
    match resolved {
        Ok(_) => true,
        Err(e) => e.kind() == ParseErrorKind::NotEnough,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_builtin_is_listed_once() {
        let names: Vec<_> = all().into_iter().map(|(n, _)| n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn eq_by_type() {
        assert!(eq(&json!("abc"), &args(&["abc"])));
        assert!(!eq(&json!("abc"), &args(&["3"])));
        assert!(eq(&json!(1), &args(&["1"])));
        assert!(eq(&json!(1.5), &args(&["1.5"])));
        assert!(eq(&json!(true), &args(&["true"])));
        assert!(!eq(&json!(false), &args(&["true"])));
        assert!(eq(&json!([1, 2]), &args(&["2"])));
        assert!(eq(&json!({"a": 1}), &args(&["1"])));
        assert!(!eq(&json!(1), &[]));
        assert!(!eq(&Value::Null, &args(&["null"])));
    }

    #[test]
    fn ne_needs_an_argument() {
        assert!(ne(&json!(2), &args(&["1"])));
        assert!(!ne(&json!(1), &args(&["1"])));
        assert!(!ne(&json!(1), &[]));
    }

    #[test]
    fn ordering_rules() {
        assert!(gt(&json!(5), &args(&["4"])));
        assert!(!gt(&json!(4), &args(&["4"])));
        assert!(gte(&json!(4), &args(&["4"])));
        assert!(lt(&json!(-1), &args(&["0"])));
        assert!(lte(&json!(2.5), &args(&["2.5"])));
        assert!(gt(&json!(u64::MAX), &args(&["1"])));
        assert!(gte(&json!("héllo"), &args(&["5"])));
        assert!(!gte(&json!("héllo"), &args(&["6"])));
        assert!(lt(&json!([1]), &args(&["2"])));
    }

    #[test]
    fn unparseable_arguments_fail() {
        assert!(!gt(&json!(5), &args(&["five"])));
        assert!(!gte(&json!("abc"), &args(&["-1"])));
        assert!(!lt(&json!(true), &args(&["1"])));
        assert!(!len(&json!("abc"), &[]));
    }

    #[test]
    fn min_and_max_are_inclusive() {
        let registry = all();
        let find = |name: &str| {
            registry
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, h)| Arc::clone(h))
                .unwrap()
        };
        assert!(find("min").evaluate(&json!(3), &args(&["3"])));
        assert!(find("max").evaluate(&json!("abc"), &args(&["3"])));
        assert!(!find("max").evaluate(&json!("abcd"), &args(&["3"])));
    }

    #[test]
    fn len_counts_characters() {
        assert!(len(&json!("日本語"), &args(&["3"])));
        assert!(len(&json!([1, 2, 3]), &args(&["3"])));
        assert!(len(&json!(3), &args(&["3"])));
        assert!(!len(&json!(null), &args(&["0"])));
    }

    #[test]
    fn one_of_strings_and_integers() {
        assert!(one_of(&json!("red"), &args(&["red", "green"])));
        assert!(one_of(&json!(2), &args(&["1", "2"])));
        assert!(!one_of(&json!(2.5), &args(&["2.5"])));
        assert!(!one_of(&json!("blue"), &args(&["red", "green"])));
    }

    #[test]
    fn contains_text_or_element() {
        assert!(contains(&json!("validator"), &args(&["lid"])));
        assert!(contains(&json!(["a", "b"]), &args(&["b"])));
        assert!(!contains(&json!([1, 2]), &args(&["1"])));
        assert!(!contains(&json!("x"), &[]));
    }

    #[test]
    fn number_and_boolean() {
        assert!(number(&json!(1.25), &[]));
        assert!(number(&json!("-12.5"), &[]));
        assert!(!number(&json!("12."), &[]));
        assert!(!number(&json!("1e3"), &[]));

        assert!(boolean(&json!(false), &[]));
        assert!(boolean(&json!("T"), &[]));
        assert!(!boolean(&json!("yes"), &[]));
        assert!(!boolean(&json!(1), &[]));
    }

    #[test]
    fn string_patterns() {
        assert!(email(&json!("someone@example.com"), &[]));
        assert!(!email(&json!("someone@"), &[]));
        assert!(!email(&json!(5), &[]));

        assert!(alpha_unicode(&json!("Grüße"), &[]));
        assert!(!alpha_unicode(&json!("abc1"), &[]));
        assert!(!alpha_unicode(&json!(""), &[]));

        assert!(jwt(&json!("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0.sig-_x"), &[]));
        assert!(!jwt(&json!("not a token"), &[]));
    }

    #[test]
    fn urls() {
        assert!(url(&json!("https://example.com/path"), &[]));
        assert!(url(&json!("mailto:someone@example.com"), &[]));
        assert!(url(&json!("file:///etc/hosts"), &[]));
        assert!(!url(&json!("example.com"), &[]));
        assert!(!url(&json!(""), &[]));

        assert!(http_url(&json!("HTTP://Example.com"), &[]));
        assert!(!http_url(&json!("ftp://example.com"), &[]));
        assert!(!http_url(&json!("mailto:someone@example.com"), &[]));
    }

    #[test]
    fn uris() {
        assert!(uri(&json!("/relative/to/root"), &[]));
        assert!(uri(&json!("urn:isbn:0451450523"), &[]));
        assert!(uri(&json!("https://example.com/#frag"), &[]));
        assert!(!uri(&json!("#only-fragment"), &[]));
        assert!(!uri(&json!("relative/path"), &[]));
    }

    #[test]
    fn datetime_uses_strftime() {
        assert!(datetime(&json!("2024-02-29"), &args(&["%Y-%m-%d"])));
        assert!(!datetime(&json!("2024-02-30"), &args(&["%Y-%m-%d"])));
        assert!(!datetime(&json!("29/02/2024"), &args(&["%Y-%m-%d"])));
        assert!(!datetime(&json!("2024-02-29"), &[]));
        assert!(datetime(&json!("23:59"), &args(&["%H:%M"])));
        assert!(!datetime(&json!("24:10"), &args(&["%H:%M"])));
    }
}
