//=========================================================================
// TileMap
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{RenderTarget, Sprite};

//=== TileMap =============================================================

/// Grid of optional sprites on a fixed tile size.
#[derive(Debug, Clone)]
pub struct TileMap {
    tile_width: u32,
    tile_height: u32,
    width: usize,
    height: usize,
    tiles: Vec<Vec<Option<Sprite>>>,
}

impl TileMap {
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            width: 0,
            height: 0,
            tiles: Vec::new(),
        }
    }

    /// Places `sprite` at cell `(x, y)`, growing every row as needed.
    pub fn set_tile(&mut self, x: usize, y: usize, sprite: Sprite) {
        self.width = self.width.max(x + 1);
        self.height = self.height.max(y + 1);

        self.tiles.resize_with(self.height, Vec::new);
        for row in &mut self.tiles {
            row.resize_with(self.width, || None);
        }

        self.tiles[y][x] = Some(sprite);
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Sprite> {
        self.tiles.get(y)?.get(x)?.as_ref()
    }

    /// Grid size in cells as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let Some(sprite) = tile else { continue };
                sprite.draw(
                    target,
                    (x as u32 * self.tile_width) as f64,
                    (y as u32 * self.tile_height) as f64,
                );
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::{CommandBuffer, DrawCommand, Texture, TextureHandle};

    fn tile() -> Sprite {
        Sprite::new(Texture {
            handle: TextureHandle(7),
            width: 16,
            height: 16,
        })
    }

    #[test]
    fn set_tile_grows_grid() {
        let mut map = TileMap::new(16, 16);
        map.set_tile(3, 1, tile());

        assert_eq!(map.size(), (4, 2));
        assert!(map.tile(3, 1).is_some());
        assert!(map.tile(0, 0).is_none());
        assert!(map.tile(9, 9).is_none());
    }

    #[test]
    fn draw_places_tiles_on_grid() {
        let mut map = TileMap::new(16, 8);
        map.set_tile(0, 0, tile());
        map.set_tile(2, 3, tile());

        let mut buffer = CommandBuffer::new();
        map.draw(&mut buffer);

        let origins: Vec<(f64, f64)> = buffer
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Texture { dst, .. } => Some((dst.x, dst.y)),
                _ => None,
            })
            .collect();
        assert_eq!(origins, vec![(0.0, 0.0), (32.0, 24.0)]);
    }
}
