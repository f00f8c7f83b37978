mod comms;
mod constants;
mod interrupt;
mod memory;
mod render;
mod utils;
mod video;

pub use comms::{new_frame_comms, FrameRequester, FrameSender};
pub use constants::video::{H_RES, V_RES};
pub use interrupt::Interrupts;
pub use memory::VideoMemory;
pub use render::{new_render_target, ProceduralRenderer, Renderer, RenderTarget};
pub use video::{Ppu, Signal};

/// A complete frame of RGB555 pixels, one halfword per pixel.
pub type FrameBuffer = Box<[u16]>;
