//! set - Assign a variable in the running script's scope
//!
//! Usage: set NAME VALUE
//!
//! The variable lives in the scope of the current execution and disappears
//! when the script finishes. The status variable `?` cannot be assigned.

use crate::commands::{Command, CommandContext};
use crate::interpreter::environment::STATUS_VAR;
use crate::interpreter::types::{STATUS_FAILURE, STATUS_SUCCESS};

const SET_USAGE: &str = "set: usage: set NAME VALUE\n";

pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> i32 {
        let (name, value) = match ctx.operands() {
            [name, value] => (name.clone(), value.clone()),
            _ => {
                ctx.write_out(SET_USAGE);
                return STATUS_FAILURE;
            }
        };
        if name == STATUS_VAR {
            ctx.write_out(&format!("set: {}: readonly variable\n", STATUS_VAR));
            return STATUS_FAILURE;
        }
        ctx.env.set(name, value);
        STATUS_SUCCESS
    }

    fn description(&self) -> &str {
        "set NAME VALUE: assign a variable for the rest of the script"
    }
}
