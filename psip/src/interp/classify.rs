//! Token classifier
//!
//! Turns one raw token into a literal [`Value`], trying each grammar in a
//! fixed order: boolean, number, block, name, string. The grammars are
//! disjoint on their first character, so the first match wins. `None` means
//! the token is not a literal and has to be looked up in the dictionary stack.

use super::value::Value;
use crate::lexer::split_block;
use tracing::trace;

type Classifier = fn(&str) -> Option<Value>;

const CLASSIFIERS: [(&str, Classifier); 5] = [
    ("boolean", boolean),
    ("number", number),
    ("block", block),
    ("name", name),
    ("string", string),
];

/// Classify a token as a literal
pub fn classify(token: &str) -> Option<Value> {
    CLASSIFIERS.iter().find_map(|(kind, classifier)| {
        let value = classifier(token);
        if value.is_none() {
            trace!(token, kind, "not a literal of this kind");
        }
        value
    })
}

fn boolean(token: &str) -> Option<Value> {
    match token {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn number(token: &str) -> Option<Value> {
    if !is_decimal_literal(token) {
        return None;
    }
    if let Ok(n) = token.parse::<i64>() {
        return Some(Value::Int(n));
    }
    let x = token.parse::<f64>().ok()?;
    // Integral values that fit are stored as integers: "2.0" is 2
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(Value::Int(x as i64))
    } else {
        Some(Value::Real(x))
    }
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with at least one mantissa digit
fn is_decimal_literal(token: &str) -> bool {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let body = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if whole.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

fn block(token: &str) -> Option<Value> {
    let body = token.strip_prefix('{')?.strip_suffix('}')?;
    Some(Value::Block(split_block(body).into()))
}

fn name(token: &str) -> Option<Value> {
    token.starts_with('/').then(|| Value::name(token))
}

fn string(token: &str) -> Option<Value> {
    let body = token.strip_prefix('(')?.strip_suffix(')')?;
    Some(Value::string(body))
}
