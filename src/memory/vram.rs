/// Pixel data stores: tile sets, tile maps, and bitmap pages.

use bitflags::bitflags;

use crate::constants::video::{
    FRAME_PIXELS, H_RES, SMALL_BITMAP_HEIGHT, SMALL_BITMAP_WIDTH, V_RES,
};
use crate::utils::bits::u16;

bitflags! {
    #[derive(Default)]
    pub struct TileMapAttrs: u16 {
        const PALETTE  = u16::bits(12, 15);
        const V_FLIP   = u16::bit(11);
        const H_FLIP   = u16::bit(10);
        const TILE_NUM = u16::bits(0, 9);
    }
}

impl TileMapAttrs {
    pub fn tile_num(self) -> u32 {
        (self & TileMapAttrs::TILE_NUM).bits() as u32
    }

    pub fn h_flip(self) -> bool {
        self.contains(TileMapAttrs::H_FLIP)
    }

    pub fn v_flip(self) -> bool {
        self.contains(TileMapAttrs::V_FLIP)
    }

    pub fn palette_num(self) -> u8 {
        ((self & TileMapAttrs::PALETTE).bits() >> 12) as u8
    }
}

/// Raw character data for one layer, replaced wholesale. Texels are
/// addressed in halfword units from a caller-supplied tile base.
pub struct TileSet {
    data: Vec<u16>,
}

impl TileSet {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn reset(&mut self) {
        self.data.clear();
    }

    pub fn load(&mut self, data: &[u16]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    fn halfword(&self, index: u32) -> u16 {
        self.data.get(index as usize).copied().unwrap_or(0)
    }

    /// 16-colour texel. A tile row packs eight 4-bit texels into four
    /// halfwords, lowest nibble leftmost.
    pub fn texel_4bpp(&self, base: u32, x: u8, y: u8) -> u8 {
        let data = self.halfword(base + (y as u32) * 2 + (x as u32) / 4);
        ((data >> ((x % 4) * 4)) & 0xF) as u8
    }

    /// 256-colour texel. A tile row packs eight byte texels into four
    /// halfwords, low byte leftmost.
    pub fn texel_8bpp(&self, base: u32, x: u8, y: u8) -> u8 {
        let data = self.halfword(base + (y as u32) * 4 + (x as u32) / 2);
        if x % 2 == 1 {
            (data >> 8) as u8
        } else {
            data as u8
        }
    }
}

/// Tile map entries for one layer, replaced wholesale.
pub struct TileMap {
    entries: Vec<u16>,
}

impl TileMap {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn load(&mut self, data: &[u16]) {
        self.entries.clear();
        self.entries.extend_from_slice(data);
    }

    fn entry(&self, index: u32) -> u16 {
        self.entries.get(index as usize).copied().unwrap_or(0)
    }

    /// Decoded entry for a regular background.
    pub fn attrs(&self, index: u32) -> TileMapAttrs {
        TileMapAttrs::from_bits_truncate(self.entry(index))
    }

    /// Tile number for an affine background. Affine map entries are
    /// single bytes, packed two per halfword.
    pub fn affine_tile_num(&self, byte_index: u32) -> u32 {
        let entry = self.entry(byte_index / 2);
        let byte = if byte_index % 2 == 1 {
            (entry >> 8) as u8
        } else {
            entry as u8
        };
        byte as u32
    }
}

/// All pixel data owned by the video unit: per-background tile sets
/// and maps, the object tile set, and the bitmap mode buffers.
pub struct VRAM {
    pub(crate) bg_tiles:  [TileSet; 4],
    pub(crate) bg_maps:   [TileMap; 4],
    pub(crate) obj_tiles: TileSet,

    mode3: Vec<u16>,
    mode4: [Vec<u8>; 2],
    mode5: [Vec<u16>; 2],
    mode5_page: usize,
}

impl VRAM {
    pub fn new() -> Self {
        Self {
            bg_tiles:   [TileSet::new(), TileSet::new(), TileSet::new(), TileSet::new()],
            bg_maps:    [TileMap::new(), TileMap::new(), TileMap::new(), TileMap::new()],
            obj_tiles:  TileSet::new(),
            mode3:      vec![0; FRAME_PIXELS],
            mode4:      [vec![0; FRAME_PIXELS], vec![0; FRAME_PIXELS]],
            mode5:      [
                vec![0; SMALL_BITMAP_WIDTH * SMALL_BITMAP_HEIGHT],
                vec![0; SMALL_BITMAP_WIDTH * SMALL_BITMAP_HEIGHT],
            ],
            mode5_page: 0,
        }
    }

    pub fn reset(&mut self) {
        for tiles in &mut self.bg_tiles {
            tiles.reset();
        }
        for map in &mut self.bg_maps {
            map.reset();
        }
        self.obj_tiles.reset();
        self.mode3.fill(0);
        for page in &mut self.mode4 {
            page.fill(0);
        }
        for page in &mut self.mode5 {
            page.fill(0);
        }
        self.mode5_page = 0;
    }

    /// Replace the character data of one background. Out-of-range
    /// background indices are ignored.
    pub fn load_bg_tiles(&mut self, bg: usize, data: &[u16]) {
        match self.bg_tiles.get_mut(bg) {
            Some(tiles) => tiles.load(data),
            None => log::debug!("tile load for invalid background {}", bg),
        }
    }

    /// Replace the tile map of one background. Out-of-range background
    /// indices are ignored.
    pub fn load_bg_map(&mut self, bg: usize, data: &[u16]) {
        match self.bg_maps.get_mut(bg) {
            Some(map) => map.load(data),
            None => log::debug!("map load for invalid background {}", bg),
        }
    }

    /// Replace the object character data.
    pub fn load_obj_tiles(&mut self, data: &[u16]) {
        self.obj_tiles.load(data);
    }

    // Mode 3 bitmap.

    /// Write one mode 3 pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, colour: u16) {
        if x < H_RES && y < V_RES {
            self.mode3[y * H_RES + x] = colour;
        }
    }

    /// Read one mode 3 pixel. Out-of-range coordinates read as 0.
    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        if x < H_RES && y < V_RES {
            self.mode3[y * H_RES + x]
        } else {
            0
        }
    }

    /// Replace the whole mode 3 frame. Short buffers zero the remainder.
    pub fn load_mode3(&mut self, data: &[u16]) {
        load_fixed(&mut self.mode3, data);
    }

    pub(crate) fn mode3_line(&self, line: u8) -> &[u16] {
        let start = (line as usize) * H_RES;
        &self.mode3[start..start + H_RES]
    }

    // Mode 4 paletted bitmap pages.

    /// Replace one mode 4 page. Short buffers zero the remainder.
    pub fn load_mode4_page(&mut self, page: usize, data: &[u8]) {
        match self.mode4.get_mut(page) {
            Some(buffer) => load_fixed(buffer, data),
            None => log::debug!("load for invalid mode 4 page {}", page),
        }
    }

    pub(crate) fn mode4_line(&self, page: usize, line: u8) -> &[u8] {
        let start = (line as usize) * H_RES;
        &self.mode4[page][start..start + H_RES]
    }

    // Mode 5 half-size bitmap pages.

    /// Replace one mode 5 page. Short buffers zero the remainder.
    pub fn load_mode5_page(&mut self, page: usize, data: &[u16]) {
        match self.mode5.get_mut(page) {
            Some(buffer) => load_fixed(buffer, data),
            None => log::debug!("load for invalid mode 5 page {}", page),
        }
    }

    /// Swap which mode 5 page is displayed.
    pub fn flip_mode5_page(&mut self) {
        self.mode5_page = 1 - self.mode5_page;
    }

    pub fn mode5_page(&self) -> usize {
        self.mode5_page
    }

    /// One line of the displayed mode 5 page, or None below the
    /// bitmap's height.
    pub(crate) fn mode5_line(&self, line: u8) -> Option<&[u16]> {
        if (line as usize) < SMALL_BITMAP_HEIGHT {
            let start = (line as usize) * SMALL_BITMAP_WIDTH;
            Some(&self.mode5[self.mode5_page][start..start + SMALL_BITMAP_WIDTH])
        } else {
            None
        }
    }
}

fn load_fixed<T: Copy + Default>(buffer: &mut [T], data: &[T]) {
    let len = data.len().min(buffer.len());
    buffer[..len].copy_from_slice(&data[..len]);
    for entry in &mut buffer[len..] {
        *entry = T::default();
    }
}
