//! Comparison and boolean operators

use crate::interp::{InterpError, InterpResult, Interpreter, Value};
use std::cmp::Ordering;

pub(super) fn eq(interp: &mut Interpreter) -> InterpResult<()> {
    let equal = interp.operand("eq", 1)? == interp.operand("eq", 0)?;
    interp.replace_top(2, Value::Bool(equal));
    Ok(())
}

pub(super) fn ne(interp: &mut Interpreter) -> InterpResult<()> {
    let equal = interp.operand("ne", 1)? == interp.operand("ne", 0)?;
    interp.replace_top(2, Value::Bool(!equal));
    Ok(())
}

/// Order `lower` against `top`; numbers and strings only.
/// `None` when a NaN is involved.
fn order(interp: &Interpreter, operator: &'static str) -> InterpResult<Option<Ordering>> {
    let rhs = interp.operand(operator, 0)?;
    let lhs = interp.operand(operator, 1)?;
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => match (lhs.as_float(), rhs.as_float()) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            (None, _) => Err(InterpError::type_check(operator, "number or string", lhs.type_name())),
            (_, None) => Err(InterpError::type_check(operator, "number or string", rhs.type_name())),
        },
    }
}

fn compare(
    interp: &mut Interpreter,
    operator: &'static str,
    accept: fn(Ordering) -> bool,
) -> InterpResult<()> {
    let result = order(interp, operator)?.is_some_and(accept);
    interp.replace_top(2, Value::Bool(result));
    Ok(())
}

pub(super) fn ge(interp: &mut Interpreter) -> InterpResult<()> {
    compare(interp, "ge", Ordering::is_ge)
}

pub(super) fn gt(interp: &mut Interpreter) -> InterpResult<()> {
    compare(interp, "gt", Ordering::is_gt)
}

pub(super) fn le(interp: &mut Interpreter) -> InterpResult<()> {
    compare(interp, "le", Ordering::is_le)
}

pub(super) fn lt(interp: &mut Interpreter) -> InterpResult<()> {
    compare(interp, "lt", Ordering::is_lt)
}

/// Logical on booleans, bitwise on integers
fn logical(
    interp: &mut Interpreter,
    operator: &'static str,
    bool_op: fn(bool, bool) -> bool,
    int_op: fn(i64, i64) -> i64,
) -> InterpResult<()> {
    let rhs = interp.operand(operator, 0)?;
    let lhs = interp.operand(operator, 1)?;
    let result = match (lhs, rhs) {
        (Value::Bool(a), Value::Bool(b)) => Value::Bool(bool_op(*a, *b)),
        (Value::Int(a), Value::Int(b)) => Value::Int(int_op(*a, *b)),
        (Value::Bool(_) | Value::Int(_), other) | (other, _) => {
            return Err(InterpError::type_check(operator, "boolean or integer", other.type_name()));
        }
    };
    interp.replace_top(2, result);
    Ok(())
}

pub(super) fn and(interp: &mut Interpreter) -> InterpResult<()> {
    logical(interp, "and", |a, b| a && b, |a, b| a & b)
}

pub(super) fn or(interp: &mut Interpreter) -> InterpResult<()> {
    logical(interp, "or", |a, b| a || b, |a, b| a | b)
}

pub(super) fn not(interp: &mut Interpreter) -> InterpResult<()> {
    let result = match interp.operand("not", 0)? {
        Value::Bool(b) => Value::Bool(!b),
        Value::Int(n) => Value::Int(!n),
        other => return Err(InterpError::type_check("not", "boolean or integer", other.type_name())),
    };
    interp.replace_top(1, result);
    Ok(())
}

pub(super) fn push_true(interp: &mut Interpreter) -> InterpResult<()> {
    interp.operands.push(Value::Bool(true));
    Ok(())
}

pub(super) fn push_false(interp: &mut Interpreter) -> InterpResult<()> {
    interp.operands.push(Value::Bool(false));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::interp::{Interpreter, Mismatch, Value};

    fn top(source: &str) -> Value {
        let mut interp = Interpreter::new();
        interp.evaluate_source(source).unwrap();
        interp.snapshot_operand_stack().pop().unwrap()
    }

    #[test]
    fn test_eq_ne() {
        assert_eq!(top("3 3 eq"), Value::Bool(true));
        assert_eq!(top("3 4 eq"), Value::Bool(false));
        assert_eq!(top("3 4 ne"), Value::Bool(true));
        assert_eq!(top("(a) (a) eq"), Value::Bool(true));
        assert_eq!(top("/a /a eq"), Value::Bool(true));
    }

    #[test]
    fn test_eq_numeric_across_int_and_real() {
        assert_eq!(top("2 2.5 eq"), Value::Bool(false));
        assert_eq!(top("0.5 0.5 eq"), Value::Bool(true));
    }

    #[test]
    fn test_eq_across_kinds_is_false() {
        assert_eq!(top("true 1 eq"), Value::Bool(false));
        assert_eq!(top("(a) /a eq"), Value::Bool(false));
        assert_eq!(top("true 1 ne"), Value::Bool(true));
    }

    #[test]
    fn test_ordering_follows_textual_order() {
        assert_eq!(top("3 4 lt"), Value::Bool(true));
        assert_eq!(top("3 4 gt"), Value::Bool(false));
        assert_eq!(top("4 4 ge"), Value::Bool(true));
        assert_eq!(top("4 4 le"), Value::Bool(true));
        assert_eq!(top("2.5 2 gt"), Value::Bool(true));
    }

    #[test]
    fn test_ordering_strings() {
        assert_eq!(top("(abc) (abd) lt"), Value::Bool(true));
        assert_eq!(top("(b) (a) ge"), Value::Bool(true));
    }

    #[test]
    fn test_ordering_incompatible_kinds() {
        let mut interp = Interpreter::new();
        interp.evaluate_source("1 (a)").unwrap();
        let err = interp.evaluate_token("lt").unwrap_err();
        assert!(matches!(err.mismatch(), Some(Mismatch::TypeCheck { got: "string", .. })));
        assert_eq!(interp.snapshot_operand_stack().len(), 2);
    }

    #[test]
    fn test_boolean_logic() {
        assert_eq!(top("true false and"), Value::Bool(false));
        assert_eq!(top("true true and"), Value::Bool(true));
        assert_eq!(top("true false or"), Value::Bool(true));
        assert_eq!(top("false not"), Value::Bool(true));
    }

    #[test]
    fn test_bitwise_on_integers() {
        assert_eq!(top("12 10 and"), Value::Int(8));
        assert_eq!(top("12 10 or"), Value::Int(14));
        assert_eq!(top("0 not"), Value::Int(-1));
    }

    #[test]
    fn test_logic_type_errors() {
        let mut interp = Interpreter::new();
        interp.evaluate_source("true 1").unwrap();
        let err = interp.evaluate_token("and").unwrap_err();
        assert!(matches!(err.mismatch(), Some(Mismatch::TypeCheck { got: "integer", .. })));

        interp.evaluate_source("clear (x)").unwrap();
        assert!(interp.evaluate_token("not").is_err());
    }
}
