//! String operators; indices count characters, not bytes

use crate::interp::{InterpError, InterpResult, Interpreter, Value};

/// Byte offset of character `index`, or the string length when `index == len`
fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(at, _)| at)
}

fn out_of_range(operator: &'static str, index: i64, len: usize) -> InterpError {
    InterpError::range_check(operator, format!("index {index} out of range for length {len}"))
}

pub(super) fn length(interp: &mut Interpreter) -> InterpResult<()> {
    let s = interp.string_operand("str_length", 0)?;
    let len = s.chars().count() as i64;
    interp.replace_top(1, Value::Int(len));
    Ok(())
}

/// `string index str_get` pushes the one-character string at `index`
pub(super) fn get(interp: &mut Interpreter) -> InterpResult<()> {
    let index = interp.int_operand("str_get", 0)?;
    let s = interp.string_operand("str_get", 1)?;
    let ch = usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .ok_or_else(|| out_of_range("str_get", index, s.chars().count()))?;
    interp.replace_top(2, Value::String(ch.to_string().into()));
    Ok(())
}

/// `string index count str_get_interval` pushes `count` characters from `index`
pub(super) fn get_interval(interp: &mut Interpreter) -> InterpResult<()> {
    let count = interp.int_operand("str_get_interval", 0)?;
    let index = interp.int_operand("str_get_interval", 1)?;
    let s = interp.string_operand("str_get_interval", 2)?;
    let len = s.chars().count();

    let (Ok(start), Ok(count)) = (usize::try_from(index), usize::try_from(count)) else {
        return Err(InterpError::range_check(
            "str_get_interval",
            format!("index {index} and count {count} must be non-negative"),
        ));
    };
    if start.checked_add(count).is_none_or(|end| end > len) {
        return Err(InterpError::range_check(
            "str_get_interval",
            format!("interval {start}+{count} out of range for length {len}"),
        ));
    }

    let interval: String = s.chars().skip(start).take(count).collect();
    interp.replace_top(3, Value::String(interval.into()));
    Ok(())
}

/// `string index insert str_put_interval` pushes a new string with `insert`
/// spliced in before character `index`; nothing of the original is dropped
pub(super) fn put_interval(interp: &mut Interpreter) -> InterpResult<()> {
    let insert = interp.string_operand("str_put_interval", 0)?;
    let index = interp.int_operand("str_put_interval", 1)?;
    let s = interp.string_operand("str_put_interval", 2)?;
    let len = s.chars().count();

    let start = usize::try_from(index)
        .ok()
        .filter(|start| *start <= len)
        .ok_or_else(|| out_of_range("str_put_interval", index, len))?;

    let at = byte_offset(&s, start);
    let spliced = format!("{}{}{}", &s[..at], insert, &s[at..]);
    interp.replace_top(3, Value::String(spliced.into()));
    Ok(())
}
