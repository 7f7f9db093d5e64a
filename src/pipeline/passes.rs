use crate::core::color::unpack_rgb;
use crate::core::framebuffer::FrameBuffer;
use rayon::prelude::*;

/// Converts the packed color buffer into a tightly packed RGB8 byte buffer.
///
/// Runs after the frame is complete; rows are converted in parallel.
pub fn post_process_to_rgb(framebuffer: &FrameBuffer) -> Vec<u8> {
    let row_bytes = framebuffer.width * 3;
    let mut rgb = vec![0u8; row_bytes * framebuffer.height];

    if row_bytes == 0 {
        return rgb;
    }

    rgb.par_chunks_mut(row_bytes)
        .zip(framebuffer.color_buffer.par_chunks(framebuffer.width))
        .for_each(|(out_row, in_row)| {
            for (out, &packed) in out_row.chunks_exact_mut(3).zip(in_row) {
                out.copy_from_slice(&unpack_rgb(packed));
            }
        });

    rgb
}
