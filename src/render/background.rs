/// Data that describes how to draw each layer of a line.

use bitflags::bitflags;

use crate::memory::AffineParams;
use crate::utils::bits::u8;

bitflags! {
    #[derive(Default)]
    pub struct WindowMask: u8 {
        const OUT_WIN  = u8::bit(2);
        const WINDOW_1 = u8::bit(1);
        const WINDOW_0 = u8::bit(0);
    }
}

impl WindowMask {
    pub fn make(win_0: bool, win_1: bool, out_win: bool) -> Self {
        let mut ret = WindowMask::default();
        ret.set(WindowMask::WINDOW_0, win_0);
        ret.set(WindowMask::WINDOW_1, win_1);
        ret.set(WindowMask::OUT_WIN, out_win);
        ret
    }
}

bitflags! {
    #[derive(Default)]
    pub struct BlendMask: u8 {
        const SECOND = u8::bit(1);
        const FIRST  = u8::bit(0);
    }
}

impl BlendMask {
    pub fn make(first: bool, second: bool) -> Self {
        let mut ret = BlendMask::default();
        ret.set(BlendMask::FIRST, first);
        ret.set(BlendMask::SECOND, second);
        ret
    }
}

/// The colour effect selected by the blend control register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlendMode {
    None,
    Alpha,
    Brighten,
    Darken,
}

/// One background's contribution to a line.
pub struct BackgroundData {
    pub index:       usize,
    pub priority:    u8,
    pub window_mask: WindowMask,
    pub blend_mask:  BlendMask,
    pub mosaic:      bool,
    pub type_data:   BackgroundTypeData,
}

pub enum BackgroundTypeData {
    Tiled(TiledBackgroundData),
    Affine(AffineBackgroundData),
}

#[derive(Clone)]
pub struct TiledBackgroundData {
    pub scroll_x: u16,
    pub scroll_y: u16,
    pub layout:   MapLayout,
    pub use_8bpp: bool,
}

#[derive(Clone)]
pub struct AffineBackgroundData {
    pub params: AffineParams,
    pub wrap:   bool,
    pub size:   u32,
}

/// Arrangement of 32x32-tile screen blocks in a regular map.
#[derive(Clone, Copy)]
pub enum MapLayout {
    /// 1x1 blocks.
    Small,
    /// 2x1 blocks.
    Wide,
    /// 1x2 blocks.
    Tall,
    /// 2x2 blocks.
    Large,
}
