//! Level definitions and the level manager
//!
//! Levels describe the brick grid as (row, col, color, hitPoints) records.
//! They come from JSON files (camelCase keys, same format the level editor
//! emits) or from the built-in set; on any load failure the manager logs and
//! falls back to the built-ins.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{Brick, GameConfig, Rgb};
use crate::sim::Rect;

/// One brick descriptor inside a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickSpec {
    #[serde(default)]
    pub row: u32,
    #[serde(default)]
    pub col: u32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "hitPoints", default = "default_hit_points")]
    pub hit_points: u32,
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_hit_points() -> u32 {
    1
}

impl BrickSpec {
    pub fn new(row: u32, col: u32, color: &str, hit_points: u32) -> Self {
        Self {
            row,
            col,
            color: color.to_string(),
            hit_points,
        }
    }
}

/// A complete level definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    #[serde(rename = "levelNumber", default = "default_level_number")]
    pub level_number: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Metadata carried by the level format; the serve speed stays a design
    /// constant in this build
    #[serde(rename = "ballSpeed", default = "default_ball_speed")]
    pub ball_speed: f32,
    #[serde(default)]
    pub bricks: Vec<BrickSpec>,
}

fn default_level_number() -> u32 {
    1
}

fn default_name() -> String {
    "Untitled".to_string()
}

fn default_ball_speed() -> f32 {
    200.0
}

impl Level {
    /// The classic full 5x10 wall, one color band per row
    pub fn standard() -> Self {
        let row_colors = ["red", "orange", "yellow", "green", "blue"];
        let mut bricks = Vec::with_capacity((BRICK_ROWS * BRICK_COLS) as usize);
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                bricks.push(BrickSpec::new(row, col, row_colors[row as usize], 1));
            }
        }
        Self {
            level_number: 1,
            name: "Classic Wall".to_string(),
            description: "Five solid rows".to_string(),
            ball_speed: 200.0,
            bricks,
        }
    }

    /// A level with no bricks at all (resolves as an instant Victory)
    pub fn empty() -> Self {
        Self {
            level_number: 1,
            name: "Empty".to_string(),
            description: String::new(),
            ball_speed: 200.0,
            bricks: Vec::new(),
        }
    }

    /// Parse a level from a JSON string
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a level from a JSON file
    pub fn load_from_json(path: &std::path::Path) -> Result<Self, LevelError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Materialize the brick entities, in grid order
    pub fn build_bricks(&self, config: &GameConfig) -> Vec<Brick> {
        self.bricks
            .iter()
            .map(|spec| {
                Brick::new(
                    grid_rect(spec.row, spec.col, config),
                    parse_color(&spec.color),
                    spec.hit_points,
                )
            })
            .collect()
    }
}

/// Playfield rectangle for a grid cell: fixed brick size and padding, the
/// whole grid centered horizontally with a fixed top offset.
pub fn grid_rect(row: u32, col: u32, config: &GameConfig) -> Rect {
    let grid_width = BRICK_COLS as f32 * (BRICK_WIDTH + BRICK_PADDING) - BRICK_PADDING;
    let offset_x = (config.field_width - grid_width) / 2.0;
    Rect::new(
        offset_x + col as f32 * (BRICK_WIDTH + BRICK_PADDING),
        BRICK_OFFSET_Y + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
        BRICK_WIDTH,
        BRICK_HEIGHT,
    )
}

/// Parse a color string: the named palette first, then #RRGGBB hex.
/// Unknown strings fall back to white with a warning.
pub fn parse_color(s: &str) -> Rgb {
    match s {
        "red" => return Rgb::new(255, 100, 100),
        "orange" => return Rgb::new(255, 180, 100),
        "yellow" => return Rgb::new(255, 255, 100),
        "green" => return Rgb::new(100, 255, 100),
        "blue" => return Rgb::new(100, 100, 255),
        "purple" => return Rgb::new(200, 100, 255),
        "cyan" => return Rgb::new(100, 255, 255),
        "magenta" => return Rgb::new(255, 100, 255),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Rgb::new(r, g, b);
            }
        }
    }

    log::warn!("Unrecognized color {s:?}, using white");
    Rgb::new(255, 255, 255)
}

/// Level loading failure; the manager logs these and keeps its built-ins
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "level file unreadable: {e}"),
            LevelError::Parse(e) => write!(f, "level file invalid: {e}"),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

/// Saved level progression
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Progress {
    current_level: u32,
    highest_unlocked: u32,
}

/// Ordered level list with progression tracking
#[derive(Debug, Clone)]
pub struct LevelManager {
    levels: Vec<Level>,
    /// 0-based index into `levels`
    current: usize,
    highest_unlocked: u32,
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelManager {
    /// Manager preloaded with the built-in level set
    pub fn new() -> Self {
        Self {
            levels: Self::default_levels(),
            current: 0,
            highest_unlocked: 1,
        }
    }

    /// The five built-in levels
    pub fn default_levels() -> Vec<Level> {
        let mut levels = vec![Level::standard()];

        // Level 2: checkerboard
        let mut bricks = Vec::new();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                if (row + col) % 2 == 0 {
                    bricks.push(BrickSpec::new(row, col, "cyan", 1));
                }
            }
        }
        levels.push(Level {
            level_number: 2,
            name: "Checkerboard".to_string(),
            description: "Every other brick".to_string(),
            ball_speed: 200.0,
            bricks,
        });

        // Level 3: pyramid narrowing toward the bottom
        let mut bricks = Vec::new();
        for row in 0..BRICK_ROWS {
            for col in row..BRICK_COLS.saturating_sub(row) {
                bricks.push(BrickSpec::new(row, col, "yellow", 1));
            }
        }
        levels.push(Level {
            level_number: 3,
            name: "Pyramid".to_string(),
            description: "Chip away at the steps".to_string(),
            ball_speed: 200.0,
            bricks,
        });

        // Level 4: armored border around a soft core
        let mut bricks = Vec::new();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let border =
                    row == 0 || row == BRICK_ROWS - 1 || col == 0 || col == BRICK_COLS - 1;
                if border {
                    bricks.push(BrickSpec::new(row, col, "purple", 2));
                } else {
                    bricks.push(BrickSpec::new(row, col, "green", 1));
                }
            }
        }
        levels.push(Level {
            level_number: 4,
            name: "Fortress".to_string(),
            description: "Crack the armored shell".to_string(),
            ball_speed: 200.0,
            bricks,
        });

        // Level 5: reinforced columns
        let mut bricks = Vec::new();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                if col % 2 == 0 {
                    let hp = if col % 4 == 0 { 3 } else { 2 };
                    bricks.push(BrickSpec::new(row, col, "magenta", hp));
                }
            }
        }
        levels.push(Level {
            level_number: 5,
            name: "Gauntlet".to_string(),
            description: "Tall columns, deep hit points".to_string(),
            ball_speed: 200.0,
            bricks,
        });

        levels
    }

    /// Replace the built-ins with `level*.json` files from a directory,
    /// sorted by file name. Keeps the built-ins when nothing valid loads.
    pub fn load_from_dir(&mut self, dir: &std::path::Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::info!("No levels directory at {}: {e}; using built-ins", dir.display());
                return;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("level") && n.ends_with(".json"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            match Level::load_from_json(&path) {
                Ok(level) => loaded.push(level),
                Err(e) => log::warn!("Skipping {}: {e}", path.display()),
            }
        }

        if loaded.is_empty() {
            log::info!("No valid level files found, keeping built-ins");
        } else {
            log::info!("Loaded {} levels from {}", loaded.len(), dir.display());
            self.levels = loaded;
            self.current = 0;
        }
    }

    pub fn total_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn current_level_number(&self) -> u32 {
        self.current as u32 + 1
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn has_next_level(&self) -> bool {
        self.current + 1 < self.levels.len()
    }

    /// Advance to the next level, unlocking it. False at the end of the set.
    pub fn next_level(&mut self) -> bool {
        if !self.has_next_level() {
            return false;
        }
        self.current += 1;
        self.highest_unlocked = self.highest_unlocked.max(self.current_level_number());
        true
    }

    /// Jump back to an unlocked level (1-based)
    pub fn reset_to(&mut self, level_number: u32) {
        if level_number >= 1
            && level_number <= self.highest_unlocked
            && (level_number as usize) <= self.levels.len()
        {
            self.current = level_number as usize - 1;
        }
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.highest_unlocked
    }

    /// Persist progression as JSON
    pub fn save_progress(&self, path: &std::path::Path) {
        let progress = Progress {
            current_level: self.current_level_number(),
            highest_unlocked: self.highest_unlocked,
        };
        match serde_json::to_string_pretty(&progress) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save progress: {e}");
                }
            }
            Err(e) => log::warn!("Failed to encode progress: {e}"),
        }
    }

    /// Restore progression saved by [`LevelManager::save_progress`]
    pub fn load_progress(&mut self, path: &std::path::Path) {
        let Ok(json) = std::fs::read_to_string(path) else {
            return;
        };
        match serde_json::from_str::<Progress>(&json) {
            Ok(progress) => {
                self.highest_unlocked = progress.highest_unlocked.max(1);
                self.reset_to(progress.current_level);
            }
            Err(e) => log::warn!("Ignoring corrupt progress file: {e}"),
        }
    }
}
