/// Software scanline drawing.

use fixed::types::I24F8;

use crate::constants::video::{H_RES, SMALL_BITMAP_WIDTH};
use crate::memory::{TileMap, TileSet, VideoMemory, VideoRegisters};

use super::background::{
    AffineBackgroundData, BackgroundData, BackgroundTypeData, BlendMask, BlendMode, MapLayout,
    TiledBackgroundData, WindowMask,
};
use super::effects;

const TILE_SIZE: u32 = 8;
/// Halfwords in one 16-colour tile.
const TILE_HALFWORDS_4BPP: u32 = 16;
/// Halfwords in one 256-colour tile.
const TILE_HALFWORDS_8BPP: u32 = 32;
/// Side length of a screen block, in tiles.
const TILE_MAP_SIZE: u32 = 32;
/// Entries in one 32x32 screen block of a regular map.
const MAP_BLOCK_ENTRIES: u32 = TILE_MAP_SIZE * TILE_MAP_SIZE;
/// Objects tiles form a 32-tile-wide sheet in 2D mapping mode.
const OBJ_SHEET_WIDTH: u32 = 32;

/// One layer's line of palette indices, with the masks that say how
/// it combines. Index 0 is transparent.
struct LayerLine<'a> {
    pixels:      &'a [u16; H_RES],
    window_mask: WindowMask,
    blend_mask:  BlendMask,
    obj:         bool,
}

pub struct SoftwareRenderer;

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one visible line into `target`, which must hold `H_RES`
    /// RGB555 pixels.
    pub fn draw_line(&self, mem: &VideoMemory, target: &mut [u16], line: u8) {
        if mem.registers.in_forced_blank() {
            target.fill(0);
            return;
        }
        match mem.registers.mode() {
            3 => self.draw_mode_3(mem, target, line),
            4 => self.draw_mode_4(mem, target, line),
            5 => self.draw_mode_5(mem, target, line),
            _ => self.draw_layers(mem, target, line),
        }
    }
}

// Internal: bitmap modes.
impl SoftwareRenderer {
    fn draw_mode_3(&self, mem: &VideoMemory, target: &mut [u16], line: u8) {
        target.copy_from_slice(mem.vram.mode3_line(line));
    }

    fn draw_mode_4(&self, mem: &VideoMemory, target: &mut [u16], line: u8) {
        let page = mem.registers.frame_page();
        for (out, index) in target.iter_mut().zip(mem.vram.mode4_line(page, line)) {
            *out = mem.palette.get_bg(*index as usize);
        }
    }

    fn draw_mode_5(&self, mem: &VideoMemory, target: &mut [u16], line: u8) {
        match mem.vram.mode5_line(line) {
            Some(src) => {
                target[..SMALL_BITMAP_WIDTH].copy_from_slice(src);
                target[SMALL_BITMAP_WIDTH..].fill(0);
            }
            None => target.fill(0),
        }
    }
}

// Internal: layered modes.
impl SoftwareRenderer {
    fn draw_layers(&self, mem: &VideoMemory, target: &mut [u16], line: u8) {
        let regs = &mem.registers;
        let bg_data = regs.bg_data_for_mode();

        let mut obj_line = [0_u16; H_RES];
        let obj_enabled = regs.is_obj_enabled();
        if obj_enabled {
            self.draw_obj_line(mem, &mut obj_line, line);
        }
        let mut bg_lines = [[0_u16; H_RES]; 4];
        for bg in &bg_data {
            self.draw_bg_line(mem, bg, &mut bg_lines[bg.index], line);
        }

        // Front to back: the object layer, then backgrounds in the
        // order the register file gave them.
        let mut layers = Vec::with_capacity(bg_data.len() + 1);
        if obj_enabled {
            layers.push(LayerLine {
                pixels:      &obj_line,
                window_mask: regs.obj_window_mask(),
                blend_mask:  regs.obj_blend_mask(),
                obj:         true,
            });
        }
        for bg in &bg_data {
            layers.push(LayerLine {
                pixels:      &bg_lines[bg.index],
                window_mask: bg.window_mask,
                blend_mask:  bg.blend_mask,
                obj:         false,
            });
        }

        if regs.windows_enabled() {
            self.combine_windowed(mem, &layers, target, line);
        } else {
            self.combine_blended(mem, &layers, target);
        }
    }

    /// Windowed combination: resolve the window region per pixel and
    /// take the front-most layer that region admits.
    fn combine_windowed(&self, mem: &VideoMemory, layers: &[LayerLine], target: &mut [u16], line: u8) {
        let regs = &mem.registers;
        for (x, out) in target.iter_mut().enumerate() {
            let mut colour = mem.palette.backdrop();
            for layer in layers {
                if !window_passes(regs, layer.window_mask, x as u8, line) {
                    continue;
                }
                if layer.pixels[x] == 0 {
                    continue;
                }
                colour = self.resolve(mem, layer, x);
                break;
            }
            *out = colour;
        }
    }

    /// Blended combination: the front-most pixel, with the selected
    /// colour effect applied across the first two layers.
    fn combine_blended(&self, mem: &VideoMemory, layers: &[LayerLine], target: &mut [u16]) {
        let regs = &mem.registers;
        let mode = regs.blend_mode();
        let (eva, evb) = regs.alpha_coeffs();
        let evy = regs.brightness_coeff();

        for (x, out) in target.iter_mut().enumerate() {
            let front = layers.iter().enumerate().find(|(_, layer)| layer.pixels[x] != 0);
            *out = match front {
                None => {
                    let backdrop = mem.palette.backdrop();
                    let mask = regs.backdrop_blend_mask();
                    match mode {
                        BlendMode::Brighten if mask.contains(BlendMask::FIRST) => {
                            effects::brighten(evy, backdrop)
                        }
                        BlendMode::Darken if mask.contains(BlendMask::FIRST) => {
                            effects::darken(evy, backdrop)
                        }
                        _ => backdrop,
                    }
                }
                Some((i, layer)) => {
                    let colour = self.resolve(mem, layer, x);
                    match mode {
                        BlendMode::Alpha if i == 0 && layer.blend_mask.contains(BlendMask::FIRST) => {
                            match layers.get(1) {
                                Some(second)
                                    if second.pixels[x] != 0
                                        && second.blend_mask.contains(BlendMask::SECOND) =>
                                {
                                    effects::alpha_blend(
                                        eva,
                                        evb,
                                        colour,
                                        self.resolve(mem, second, x),
                                    )
                                }
                                _ => colour,
                            }
                        }
                        BlendMode::Brighten if layer.blend_mask.contains(BlendMask::FIRST) => {
                            effects::brighten(evy, colour)
                        }
                        BlendMode::Darken if layer.blend_mask.contains(BlendMask::FIRST) => {
                            effects::darken(evy, colour)
                        }
                        _ => colour,
                    }
                }
            };
        }
    }

    fn resolve(&self, mem: &VideoMemory, layer: &LayerLine, x: usize) -> u16 {
        let index = layer.pixels[x] as usize;
        if layer.obj {
            mem.palette.get_obj(index)
        } else {
            mem.palette.get_bg(index)
        }
    }
}

// Internal: layer line fills.
impl SoftwareRenderer {
    fn draw_bg_line(&self, mem: &VideoMemory, bg: &BackgroundData, target: &mut [u16; H_RES], line: u8) {
        let mosaic = mem.registers.mosaic();
        let tiles = &mem.vram.bg_tiles[bg.index];
        let map = &mem.vram.bg_maps[bg.index];

        for (x, out) in target.iter_mut().enumerate() {
            let (screen_x, screen_y) = if bg.mosaic {
                (mosaic.snap_bg_x(x as u8), mosaic.snap_bg_y(line))
            } else {
                (x as u8, line)
            };
            *out = match &bg.type_data {
                BackgroundTypeData::Tiled(tiled) => {
                    let bg_x = (screen_x as u32).wrapping_add(tiled.scroll_x as u32);
                    let bg_y = (screen_y as u32).wrapping_add(tiled.scroll_y as u32);
                    self.tiled_pixel(tiled, tiles, map, bg_x, bg_y)
                }
                BackgroundTypeData::Affine(affine) => {
                    self.affine_pixel(affine, tiles, map, screen_x, screen_y)
                }
            };
        }
    }

    /// Background palette index at a point on a regular background.
    fn tiled_pixel(
        &self,
        bg: &TiledBackgroundData,
        tiles: &TileSet,
        map: &TileMap,
        bg_x: u32,
        bg_y: u32,
    ) -> u16 {
        let (x, y) = match bg.layout {
            MapLayout::Small => (bg_x % 256, bg_y % 256),
            MapLayout::Wide => (bg_x % 512, bg_y % 256),
            MapLayout::Tall => (bg_x % 256, bg_y % 512),
            MapLayout::Large => (bg_x % 512, bg_y % 512),
        };
        let map_x = x / TILE_SIZE;
        let map_y = y / TILE_SIZE;
        let block = match bg.layout {
            MapLayout::Small => 0,
            MapLayout::Wide => map_x / TILE_MAP_SIZE,
            MapLayout::Tall => map_y / TILE_MAP_SIZE,
            MapLayout::Large => (map_x / TILE_MAP_SIZE) + (map_y / TILE_MAP_SIZE) * 2,
        };
        let entry = (block * MAP_BLOCK_ENTRIES)
            + ((map_y % TILE_MAP_SIZE) * TILE_MAP_SIZE)
            + (map_x % TILE_MAP_SIZE);
        let attrs = map.attrs(entry);

        let mut tile_x = (x % TILE_SIZE) as u8;
        let mut tile_y = (y % TILE_SIZE) as u8;
        if attrs.h_flip() {
            tile_x = 7 - tile_x;
        }
        if attrs.v_flip() {
            tile_y = 7 - tile_y;
        }

        if bg.use_8bpp {
            tiles.texel_8bpp(attrs.tile_num() * TILE_HALFWORDS_8BPP, tile_x, tile_y) as u16
        } else {
            let texel = tiles.texel_4bpp(attrs.tile_num() * TILE_HALFWORDS_4BPP, tile_x, tile_y);
            if texel == 0 {
                0
            } else {
                ((attrs.palette_num() as u16) * 16) + (texel as u16)
            }
        }
    }

    /// Background palette index at a screen point on an affine
    /// background. Out-of-bounds points wrap or fall transparent
    /// depending on the mode.
    fn affine_pixel(
        &self,
        bg: &AffineBackgroundData,
        tiles: &TileSet,
        map: &TileMap,
        screen_x: u8,
        screen_y: u8,
    ) -> u16 {
        let x_i = I24F8::from_num(screen_x as i32);
        let y_i = I24F8::from_num(screen_y as i32);
        let x_out = (bg.params.pa * x_i) + (bg.params.pb * y_i) + bg.params.ref_x;
        let y_out = (bg.params.pc * x_i) + (bg.params.pd * y_i) + bg.params.ref_y;

        let size = bg.size as i32;
        let mut bg_x = x_out.to_num::<i32>();
        let mut bg_y = y_out.to_num::<i32>();
        if bg.wrap {
            bg_x &= size - 1;
            bg_y &= size - 1;
        } else if bg_x < 0 || bg_x >= size || bg_y < 0 || bg_y >= size {
            return 0;
        }
        let bg_x = bg_x as u32;
        let bg_y = bg_y as u32;

        let map_width = bg.size / TILE_SIZE;
        let entry = (bg_y / TILE_SIZE) * map_width + (bg_x / TILE_SIZE);
        let tile_num = map.affine_tile_num(entry);
        tiles.texel_8bpp(
            tile_num * TILE_HALFWORDS_8BPP,
            (bg_x % TILE_SIZE) as u8,
            (bg_y % TILE_SIZE) as u8,
        ) as u16
    }

    /// Merge every visible object into one line of object palette
    /// indices. Priority 3 draws first and 0 last, and within each
    /// priority entry 127 draws first, so the front-most pixel wins.
    fn draw_obj_line(&self, mem: &VideoMemory, target: &mut [u16; H_RES], line: u8) {
        let regs = &mem.registers;
        let tiles = &mem.vram.obj_tiles;
        let mosaic = regs.mosaic();
        let use_1d_tiles = regs.obj_1d_tiles();

        for priority in (0..4_u8).rev() {
            for object in mem.oam.ref_objects().iter().rev() {
                if object.priority() != priority || !object.is_enabled() || !object.is_visible() {
                    continue;
                }
                let (left, top) = object.coords();
                let (width, height) = object.size();
                let object_y = (line as i16) - top;
                if object_y < 0 || object_y >= height {
                    continue;
                }

                let use_8bpp = object.use_8bpp();
                let palette_offset = (object.palette_bank() as u16) * 16;
                let base_tile = object.tile_num();
                let source_size = object.source_size();
                let affine_params = object.affine_param_num().map(|n| mem.oam.affine_params(n));

                let x_0 = I24F8::from_num((width / 2) as i32);
                let y_0 = I24F8::from_num((height / 2) as i32);
                let y_i = I24F8::from_num(object_y as i32) - y_0;
                let source_x_0 = I24F8::from_num((source_size.0 / 2) as i32);
                let source_y_0 = I24F8::from_num((source_size.1 / 2) as i32);

                for object_x in 0..width {
                    let x = left + object_x;
                    if x < 0 {
                        continue;
                    }
                    if x >= H_RES as i16 {
                        break;
                    }

                    let (index_x, index_y) = if let Some(params) = &affine_params {
                        let x_i = I24F8::from_num(object_x as i32) - x_0;
                        let p_x = (params.pa * x_i) + (params.pb * y_i) + source_x_0;
                        let p_y = (params.pc * x_i) + (params.pd * y_i) + source_y_0;
                        let index_x = p_x.to_num::<i32>();
                        let index_y = p_y.to_num::<i32>();
                        if index_x < 0
                            || index_x >= source_size.0 as i32
                            || index_y < 0
                            || index_y >= source_size.1 as i32
                        {
                            continue;
                        }
                        (index_x as u8, index_y as u8)
                    } else {
                        let index_x = if object.h_flip() { width - object_x - 1 } else { object_x };
                        let index_y = if object.v_flip() { height - object_y - 1 } else { object_y };
                        (index_x as u8, index_y as u8)
                    };
                    let (index_x, index_y) = if object.is_mosaic() {
                        (mosaic.snap_obj_x(index_x), mosaic.snap_obj_y(index_y))
                    } else {
                        (index_x, index_y)
                    };

                    let tile_x = (index_x as u32) / TILE_SIZE;
                    let tile_y = (index_y as u32) / TILE_SIZE;
                    let stride_shift = if use_8bpp { 1 } else { 0 };
                    let tile_unit = if use_1d_tiles {
                        let tile_width = (source_size.0 as u32) / TILE_SIZE;
                        base_tile + ((tile_x + (tile_y * tile_width)) << stride_shift)
                    } else {
                        let sheet_x =
                            ((base_tile % OBJ_SHEET_WIDTH) + (tile_x << stride_shift)) % OBJ_SHEET_WIDTH;
                        let sheet_y = ((base_tile / OBJ_SHEET_WIDTH) + tile_y) % OBJ_SHEET_WIDTH;
                        (sheet_y * OBJ_SHEET_WIDTH) + sheet_x
                    };

                    let texel = if use_8bpp {
                        tiles.texel_8bpp(tile_unit * TILE_HALFWORDS_4BPP, index_x % 8, index_y % 8)
                    } else {
                        tiles.texel_4bpp(tile_unit * TILE_HALFWORDS_4BPP, index_x % 8, index_y % 8)
                    };
                    if texel == 0 {
                        continue;
                    }
                    target[x as usize] = if use_8bpp {
                        texel as u16
                    } else {
                        palette_offset + (texel as u16)
                    };
                }
            }
        }
    }
}

/// Resolve the window region at a point and test whether a layer's
/// mask admits it. Window 0 beats window 1 beats outside.
fn window_passes(regs: &VideoRegisters, mask: WindowMask, x: u8, y: u8) -> bool {
    if regs.window_0_enabled() && regs.x_inside_window(0, x) && regs.y_inside_window(0, y) {
        return mask.contains(WindowMask::WINDOW_0);
    }
    if regs.window_1_enabled() && regs.x_inside_window(1, x) && regs.y_inside_window(1, y) {
        return mask.contains(WindowMask::WINDOW_1);
    }
    mask.contains(WindowMask::OUT_WIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(mem: &VideoMemory, line: u8) -> Vec<u16> {
        let renderer = SoftwareRenderer::new();
        let mut target = vec![0; H_RES];
        renderer.draw_line(mem, &mut target, line);
        target
    }

    fn solid_tile_8bpp(value: u8) -> Vec<u16> {
        let halfword = ((value as u16) << 8) | (value as u16);
        vec![halfword; TILE_HALFWORDS_8BPP as usize]
    }

    fn oam_entry(a0: u16, a1: u16, a2: u16) -> [u8; 8] {
        let mut bytes = [0; 8];
        bytes[0..2].copy_from_slice(&a0.to_le_bytes());
        bytes[2..4].copy_from_slice(&a1.to_le_bytes());
        bytes[4..6].copy_from_slice(&a2.to_le_bytes());
        bytes
    }

    #[test]
    fn lower_object_entries_draw_in_front() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x1000); // mode 0, objects only
        // Tile 0 holds texel 1, tile 1 holds texel 2 (16 colours).
        let mut tiles = vec![0x1111_u16; TILE_HALFWORDS_4BPP as usize];
        tiles.extend(vec![0x2222_u16; TILE_HALFWORDS_4BPP as usize]);
        mem.vram.load_obj_tiles(&tiles);
        mem.palette.set_obj(1, 0x0111);
        mem.palette.set_obj(2, 0x0222);

        // Two overlapping 8x8 objects at the origin.
        let mut oam = Vec::new();
        oam.extend_from_slice(&oam_entry(0, 0, 0));
        oam.extend_from_slice(&oam_entry(0, 0, 1));
        mem.oam.load(&oam);

        assert_eq!(draw(&mem, 0)[0], 0x0111);

        // Pushing entry 0 behind reveals entry 1.
        let mut oam = Vec::new();
        oam.extend_from_slice(&oam_entry(0, 0, 1 << 10));
        oam.extend_from_slice(&oam_entry(0, 0, 1));
        mem.oam.load(&oam);

        assert_eq!(draw(&mem, 0)[0], 0x0222);
    }

    #[test]
    fn affine_identity_object_matches_its_source() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x1000);
        // 8x8 tile with texel value x+1 across the top row.
        let mut tiles = vec![0_u16; TILE_HALFWORDS_4BPP as usize];
        tiles[0] = 0x4321;
        tiles[1] = 0x8765;
        mem.vram.load_obj_tiles(&tiles);
        for i in 1..9 {
            mem.palette.set_obj(i, 0x1000 + i as u16);
        }

        // Affine object using identity group 0.
        let mut oam = Vec::new();
        let mut entry = oam_entry(1 << 8, 0, 0);
        entry[6..8].copy_from_slice(&0x0100_u16.to_le_bytes());
        oam.extend_from_slice(&entry);
        for _ in 0..3 {
            oam.extend_from_slice(&oam_entry(0x0200, 0, 0)); // disabled slot carriers
        }
        // Slots 1..3 carry pb, pc, pd.
        oam[14..16].copy_from_slice(&0x0000_u16.to_le_bytes());
        oam[22..24].copy_from_slice(&0x0000_u16.to_le_bytes());
        oam[30..32].copy_from_slice(&0x0100_u16.to_le_bytes());
        mem.oam.load(&oam);

        let line = draw(&mem, 0);
        for x in 0..8 {
            assert_eq!(line[x], 0x1001 + x as u16, "pixel {}", x);
        }
        assert_eq!(line[8], 0);
    }

    #[test]
    fn affine_background_wraps_in_mode_1_and_culls_in_mode_2() {
        let mut mem = VideoMemory::new();
        mem.vram.load_bg_tiles(2, &solid_tile_8bpp(7));
        // Affine map entries default to tile 0 everywhere.
        mem.palette.set_bg(7, 0x0777);
        mem.registers.set_bg_matrix_a(2, 0x0100);
        mem.registers.set_bg_matrix_d(2, 0x0100);
        mem.registers.set_bg_ref_x(2, (-10_i32 << 8) as u32);

        mem.registers.set_display_control(0x0401); // mode 1, BG2
        let line = draw(&mem, 0);
        assert_eq!(line[0], 0x0777);
        assert_eq!(line[9], 0x0777);

        mem.registers.set_display_control(0x0402); // mode 2, BG2
        let line = draw(&mem, 0);
        assert_eq!(line[0], 0);
        assert_eq!(line[9], 0);
        assert_eq!(line[10], 0x0777);
    }

    #[test]
    fn scrolled_backgrounds_wrap_their_map() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x0100); // mode 0, BG0
        mem.registers.set_bg_control(0, 1 << 7); // 256 colours, 256x256
        let mut tiles = solid_tile_8bpp(1);
        tiles.extend(solid_tile_8bpp(2));
        mem.vram.load_bg_tiles(0, &tiles);
        // Map: tile 1 at cell (0, 0), tile 0 everywhere else.
        let mut map = vec![0_u16; 1024];
        map[0] = 1;
        mem.vram.load_bg_map(0, &map);
        mem.palette.set_bg(1, 0x0101);
        mem.palette.set_bg(2, 0x0202);

        // Scrolling a full map width lands back on the same cell.
        mem.registers.set_bg_x_offset(0, 256);
        let line = draw(&mem, 0);
        assert_eq!(line[0], 0x0202);
        assert_eq!(line[8], 0x0101);
    }

    #[test]
    fn tiled_flips_mirror_within_the_cell() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x0100);
        let mut tiles = vec![0_u16; TILE_HALFWORDS_4BPP as usize];
        tiles[0] = 0x4321; // top row x0..x3
        tiles[1] = 0x8765; // top row x4..x7
        mem.vram.load_bg_tiles(0, &tiles);
        mem.vram.load_bg_map(0, &[1 << 10]); // h-flip
        for i in 1..9 {
            mem.palette.set_bg(i, i as u16);
        }
        let line = draw(&mem, 0);
        assert_eq!(line[0..8], [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn vertical_mosaic_repeats_the_block_top_line() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x0100);
        mem.registers.set_bg_control(0, (1 << 7) | (1 << 6)); // 256 colours, mosaic
        mem.registers.set_mosaic(0x0030); // 1x4 background blocks
        // Tile rows hold value y+1.
        let mut tiles = Vec::new();
        for y in 0..8_u16 {
            tiles.extend(vec![((y + 1) << 8) | (y + 1); 4]);
        }
        mem.vram.load_bg_tiles(0, &tiles);
        for i in 1..9 {
            mem.palette.set_bg(i, i as u16);
        }

        assert_eq!(draw(&mem, 0)[0], 1);
        assert_eq!(draw(&mem, 3)[0], 1);
        assert_eq!(draw(&mem, 4)[0], 5);
        assert_eq!(draw(&mem, 6)[0], 5);
    }

    #[test]
    fn forced_blank_draws_black() {
        let mut mem = VideoMemory::new();
        mem.registers.set_display_control(0x0183); // mode 3 + BG0 + forced blank
        mem.vram.set_pixel(0, 0, 0x7FFF);
        mem.palette.set_bg(0, 0x1234);
        assert!(draw(&mem, 0).iter().all(|&p| p == 0));
    }
}
