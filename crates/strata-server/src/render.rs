//! PNG rendering of a chunk for quick visual inspection.

use strata_grid::{CHUNK_SIZE, ChunkData, Material};

/// Each tile becomes a `VIEW_SCALE x VIEW_SCALE` block of pixels.
pub const VIEW_SCALE: usize = 8;

/// Side length of a rendered chunk image in pixels.
pub const VIEW_SIZE: usize = CHUNK_SIZE * VIEW_SCALE;

/// Base colour of a material.
pub fn material_color(material: Material) -> [u8; 3] {
    match material {
        Material::Void => [0, 0, 0],
        Material::Default => [35, 35, 35],
        Material::Stone => [75, 75, 75],
        Material::Grass => [30, 220, 80],
    }
}

/// RGBA pixels of a chunk, upscaled with nearest-neighbour sampling. The alpha channel
/// carries the tile's relative height.
pub fn chunk_pixels(chunk: &ChunkData) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(VIEW_SIZE * VIEW_SIZE * 4);
    for py in 0..VIEW_SIZE {
        let row = (py / VIEW_SCALE) * CHUNK_SIZE;
        for px in 0..VIEW_SIZE {
            let i = row + px / VIEW_SCALE;
            let [r, g, b] = material_color(chunk.materials()[i]);
            let alpha = (chunk.heights()[i].relative() * 255.0) as u8;
            pixels.extend_from_slice(&[r, g, b, alpha]);
        }
    }
    pixels
}

/// Encode a chunk as a `VIEW_SIZE x VIEW_SIZE` RGBA PNG.
pub fn render_chunk_png(chunk: &ChunkData) -> Result<Vec<u8>, png::EncodingError> {
    let pixels = chunk_pixels(chunk);
    let mut png_buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(
            std::io::Cursor::new(&mut png_buf),
            VIEW_SIZE as u32,
            VIEW_SIZE as u32,
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    Ok(png_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_grid::{CHUNK_TILE_COUNT, Height};

    fn striped_chunk() -> ChunkData {
        let heights: Vec<Height> = (0..CHUNK_TILE_COUNT)
            .map(|i| if i % 2 == 0 { Height::MAX } else { Height::MIN })
            .collect();
        let materials: Vec<Material> = (0..CHUNK_TILE_COUNT)
            .map(|i| if i < CHUNK_SIZE { Material::Grass } else { Material::Stone })
            .collect();
        ChunkData::from_owned(heights, materials).unwrap()
    }

    fn pixel(pixels: &[u8], x: usize, y: usize) -> [u8; 4] {
        let at = (y * VIEW_SIZE + x) * 4;
        [pixels[at], pixels[at + 1], pixels[at + 2], pixels[at + 3]]
    }

    #[test]
    fn test_pixels_upscaled_nearest_neighbour() {
        let pixels = chunk_pixels(&striped_chunk());
        assert_eq!(pixels.len(), VIEW_SIZE * VIEW_SIZE * 4);

        // Tile (0, 0): grass, full height, covering pixels 0..8 in both axes.
        assert_eq!(pixel(&pixels, 0, 0), [30, 220, 80, 255]);
        assert_eq!(pixel(&pixels, 7, 7), [30, 220, 80, 255]);
        // Tile (1, 0): grass, zero height.
        assert_eq!(pixel(&pixels, 8, 0), [30, 220, 80, 0]);
        // Tile (0, 1): stone, full height.
        assert_eq!(pixel(&pixels, 0, 8), [75, 75, 75, 255]);
    }

    #[test]
    fn test_png_header_and_size() {
        let png_bytes = render_chunk_png(&ChunkData::zero()).unwrap();
        assert_eq!(&png_bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(std::io::Cursor::new(png_bytes));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.width as usize, VIEW_SIZE);
        assert_eq!(info.height as usize, VIEW_SIZE);
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_material_colors_distinct() {
        let colors = [
            Material::Void,
            Material::Default,
            Material::Stone,
            Material::Grass,
        ]
        .map(material_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
