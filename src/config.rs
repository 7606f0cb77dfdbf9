//! Tunables for a battle, loadable from `config.json`.
//!
//! Every section falls back to its default, so a file only needs the
//! values it overrides:
//!
//! ```json
//! { "winning_score": 10, "ammo": { "max": 40 }, "log_level": "debug" }
//! ```

use crate::engine::{Point, Size};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Size,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub ammo: AmmoConfig,
    pub enemy: EnemyConfig,
    pub ui: UiConfig,
    /// game over latches once the score EXCEEDS this
    pub winning_score: u32,
    /// stop scheduling frames after the game over frame
    pub halt_on_game_over: bool,
    /// fixed seed for enemy spawns, entropy when absent
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            playfield: Size {
                width: 500.0,
                height: 500.0,
            },
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            ammo: AmmoConfig::default(),
            enemy: EnemyConfig::default(),
            ui: UiConfig::default(),
            winning_score: 3,
            halt_on_game_over: true,
            seed: None,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Point,
    pub size: Size,
    pub max_speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            start: Point { x: 20.0, y: 100.0 },
            size: Size {
                width: 120.0,
                height: 190.0,
            },
            max_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub size: Size,
    pub speed: f64,
    /// share of the playfield width a projectile travels before expiring
    pub range: f64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        ProjectileConfig {
            size: Size {
                width: 10.0,
                height: 3.0,
            },
            speed: 3.0,
            range: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoConfig {
    pub initial: u32,
    pub max: u32,
    /// milliseconds per regenerated round
    pub interval: f64,
}

impl Default for AmmoConfig {
    fn default() -> Self {
        AmmoConfig {
            initial: 20,
            max: 25,
            interval: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// milliseconds between spawns
    pub interval: f64,
    pub health: i32,
    /// spawned enemies drift left at U[0, 1) * max_speed
    pub max_speed: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            interval: 1000.0,
            health: 3,
            max_speed: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub font_size: u32,
    pub font_family: String,
    pub color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            font_size: 25,
            font_family: "Helvetica".to_string(),
            color: "white".to_string(),
        }
    }
}
