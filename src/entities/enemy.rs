use super::Bounded;
use crate::config::EnemyConfig;
use crate::engine::{Point, Rect, Renderer, Size};
use rand::Rng;
use serde::Serialize;

const BODY_COLOR: &str = "red";
const HEALTH_COLOR: &str = "black";
const HEALTH_FONT: &str = "20px helvetica";

/// Enemy flavours, each described by a KindProfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Angler1,
}

/// Per kind spawn rules
/// - size     : bounding box, fixed for the enemy's lifetime
/// - y_band   : share of the playfield height the enemy may spawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub size: Size,
    pub y_band: f64,
}

impl EnemyKind {
    pub fn profile(&self) -> KindProfile {
        match self {
            // 228x169 sprite frame drawn at 20%
            EnemyKind::Angler1 => KindProfile {
                size: Size {
                    width: 228.0 * 0.2,
                    height: 169.0 * 0.2,
                },
                y_band: 0.9,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub position: Point,
    size: Size,
    speed_x: f64,
    /// lowered by Battle on projectile hits
    pub health: i32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    /// Places a new enemy on the right edge of the playfield
    /// - y in [0, y_band * height - enemy height)
    /// - speed in (-max_speed, 0]
    pub fn spawn(
        kind: EnemyKind,
        config: &EnemyConfig,
        playfield: Size,
        rng: &mut impl Rng,
    ) -> Self {
        let profile = kind.profile();
        let y = rng.gen::<f64>() * (playfield.height * profile.y_band - profile.size.height);
        let speed_x = rng.gen::<f64>() * -config.max_speed;
        Enemy::new(
            kind,
            Point {
                x: playfield.width,
                y,
            },
            speed_x,
            config.health,
        )
    }

    pub fn new(kind: EnemyKind, position: Point, speed_x: f64, health: i32) -> Self {
        Enemy {
            kind,
            position,
            size: kind.profile().size,
            speed_x,
            health,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        self.position.x += self.speed_x;
        if self.position.x + self.size.width < 0.0 {
            self.marked_for_deletion = true;
        }
    }

    pub fn speed_x(&self) -> f64 {
        self.speed_x
    }

    pub fn draw(&self, renderer: &Renderer) {
        renderer.fill_rect(&self.bounding_box(), BODY_COLOR);
        renderer.fill_text(
            &self.health.to_string(),
            &self.position,
            HEALTH_FONT,
            HEALTH_COLOR,
        );
    }
}

impl Bounded for Enemy {
    fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}
