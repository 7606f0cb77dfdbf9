use super::Bounded;
use crate::config::ProjectileConfig;
use crate::engine::{Point, Rect, Renderer, Size};
use serde::Serialize;

const COLOR: &str = "yellow";

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub position: Point,
    size: Size,
    speed: f64,
    /// x coordinate past which the projectile expires
    range: f64,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(position: Point, config: &ProjectileConfig, playfield: Size) -> Self {
        Projectile {
            position,
            size: config.size,
            speed: config.speed,
            range: playfield.width * config.range,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        self.position.x += self.speed;
        if self.position.x > self.range {
            self.marked_for_deletion = true;
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        renderer.fill_rect(&self.bounding_box(), COLOR);
    }
}

impl Bounded for Projectile {
    fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn playfield() -> Size {
        Size {
            width: 500.0,
            height: 500.0,
        }
    }

    #[test]
    fn moves_right_by_speed() {
        let mut projectile = Projectile::new(
            Point { x: 20.0, y: 100.0 },
            &ProjectileConfig::default(),
            playfield(),
        );
        projectile.update();
        assert_relative_eq!(projectile.position.x, 23.0);
        assert_relative_eq!(projectile.position.y, 100.0);
    }

    #[test]
    fn expires_only_after_passing_eighty_percent_of_width() {
        let mut projectile = Projectile::new(
            Point { x: 20.0, y: 100.0 },
            &ProjectileConfig::default(),
            playfield(),
        );
        // 20 + 3 * 126 = 398
        for _ in 0..126 {
            projectile.update();
            assert!(!projectile.marked_for_deletion, "x = {}", projectile.position.x);
        }
        projectile.update();
        assert_relative_eq!(projectile.position.x, 401.0);
        assert!(projectile.marked_for_deletion);
    }

    #[test]
    fn exactly_at_range_is_still_alive() {
        let config = ProjectileConfig {
            speed: 10.0,
            ..ProjectileConfig::default()
        };
        let mut projectile = Projectile::new(Point { x: 390.0, y: 0.0 }, &config, playfield());
        projectile.update();
        assert_relative_eq!(projectile.position.x, 400.0);
        assert!(!projectile.marked_for_deletion);
    }
}
