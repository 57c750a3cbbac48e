//! Output operator

use crate::interp::{InterpResult, Interpreter};

/// `any =` removes the top value and emits its print form
pub(super) fn print(interp: &mut Interpreter) -> InterpResult<()> {
    let text = interp.operand("=", 0)?.print_form();
    interp.operands.discard(1);
    interp.emit(text);
    Ok(())
}
