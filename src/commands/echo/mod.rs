// src/commands/echo/mod.rs
use crate::commands::{Command, CommandContext};
use crate::interpreter::types::STATUS_SUCCESS;

pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> i32 {
        let mut output = ctx.operands().join(" ");
        output.push('\n');
        ctx.write_out(&output);
        STATUS_SUCCESS
    }

    fn description(&self) -> &str {
        "write arguments separated by spaces, followed by a newline"
    }
}
