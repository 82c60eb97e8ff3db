use tracing::debug;

use crate::context::DrawContext;
use crate::error::DrawError;
use crate::resources::Buffer;

pub const UNBOUND_UNIFORM_BUFFER_MESSAGE: &str =
    "It is undefined behaviour to have a used but unbound uniform buffer.";

/// Collect the buffer behind every active uniform block and hand them to the program.
///
/// A block whose binding point has no buffer fails the draw; nothing is applied in that case.
pub fn apply_uniform_buffers(ctx: &DrawContext<'_>) -> Result<(), DrawError> {
    let program = ctx.program;
    let block_count = program.active_uniform_block_count();

    let mut buffers: Vec<&dyn Buffer> = Vec::with_capacity(block_count as usize);
    for block_index in 0..block_count {
        let binding = program.uniform_block_binding(block_index);
        let buffer = ctx
            .resources
            .indexed_uniform_buffer(binding)
            .filter(|buffer| !buffer.id().is_none());
        let Some(buffer) = buffer else {
            debug!(block_index, binding, "active uniform block has no buffer bound");
            return Err(DrawError::invalid_operation(UNBOUND_UNIFORM_BUFFER_MESSAGE));
        };
        buffers.push(buffer);
    }

    program.apply_uniform_buffers(&buffers, ctx.caps)?;
    Ok(())
}
