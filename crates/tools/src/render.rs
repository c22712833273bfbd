//! Text renderings of a generated layout.

use dungeon_core::classify::TileKind;
use dungeon_core::{GenerationResult, classify};

const ROOM: char = '.';
const CORRIDOR: char = '#';
const DOOR: char = '+';

/// One line per row with `+y` at the top; trailing blanks are trimmed.
pub fn ascii(result: &GenerationResult) -> String {
    let tiles = classify(&result.floor_tiles, &result.corridor_tiles);
    let Some((first, _)) = tiles.iter().next() else {
        return String::new();
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for (pos, _) in tiles.iter() {
        min_x = min_x.min(pos.x);
        max_x = max_x.max(pos.x);
        min_y = min_y.min(pos.y);
        max_y = max_y.max(pos.y);
    }

    let width = (max_x - min_x + 1) as usize;
    let height = (max_y - min_y + 1) as usize;
    let mut grid = vec![vec![' '; width]; height];
    for (pos, flags) in tiles.iter() {
        let glyph = match flags.kind {
            TileKind::Room => ROOM,
            TileKind::Corridor if flags.is_door() => DOOR,
            TileKind::Corridor => CORRIDOR,
        };
        grid[(max_y - pos.y) as usize][(pos.x - min_x) as usize] = glyph;
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn json(result: &GenerationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
