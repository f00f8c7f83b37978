/// Renderer for video output.

pub mod background;
pub mod effects;

mod drawing;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::constants::video::{FRAME_PIXELS, H_RES, V_RES};
use crate::memory::VideoMemory;
use crate::FrameBuffer;

/// A frame buffer shared between the video unit and a display thread.
pub type RenderTarget = Arc<Mutex<FrameBuffer>>;

/// Create a zeroed render target holding one whole frame.
pub fn new_render_target() -> RenderTarget {
    Arc::new(Mutex::new(vec![0; FRAME_PIXELS].into_boxed_slice()))
}

/// Renderer trait. The video unit uses this to signal rendering.
pub trait Renderer {
    fn new(target: RenderTarget) -> Self;
    /// Render a single visible line.
    fn render_line(&mut self, mem: &VideoMemory, line: u8);
    /// Start rendering a frame.
    fn start_frame(&mut self);
    /// Complete rendering a frame.
    fn finish_frame(&mut self);
    /// The size of the video output.
    fn render_size() -> (usize, usize);
}

/// Renders lines into the target as the video unit reaches them.
pub struct ProceduralRenderer {
    renderer: drawing::SoftwareRenderer,
    target:   RenderTarget,
}

impl Renderer for ProceduralRenderer {
    fn new(target: RenderTarget) -> Self {
        Self {
            renderer: drawing::SoftwareRenderer::new(),
            target,
        }
    }

    fn render_line(&mut self, mem: &VideoMemory, line: u8) {
        let start = (line as usize) * H_RES;
        let mut target = self.target.lock();
        self.renderer.draw_line(mem, &mut target[start..start + H_RES], line);
    }

    fn start_frame(&mut self) {}

    fn finish_frame(&mut self) {}

    fn render_size() -> (usize, usize) {
        (H_RES, V_RES)
    }
}
