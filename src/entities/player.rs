use super::{Bounded, Projectile};
use crate::config::{PlayerConfig, ProjectileConfig};
use crate::controls::{Control, HeldKeys};
use crate::engine::{Point, Rect, Renderer, Size};
use serde::Serialize;

const COLOR: &str = "black";

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub position: Point,
    size: Size,
    speed_y: f64,
    max_speed: f64,
    projectiles: Vec<Projectile>,
    #[serde(skip)]
    projectile_config: ProjectileConfig,
    #[serde(skip)]
    playfield: Size,
}

impl Player {
    pub fn new(config: &PlayerConfig, projectile_config: &ProjectileConfig, playfield: Size) -> Self {
        Player {
            position: config.start,
            size: config.size,
            speed_y: 0.0,
            max_speed: config.max_speed,
            projectiles: Vec::new(),
            projectile_config: projectile_config.clone(),
            playfield,
        }
    }

    /// ::update per frame
    /// - held keys -> vertical speed (Up beats Down)
    /// - speed -> position, unclamped
    /// - projectiles move, then expired ones are dropped
    pub fn update(&mut self, keys: &HeldKeys) {
        self.speed_y = if keys.is_held(Control::Up) {
            -self.max_speed
        } else if keys.is_held(Control::Down) {
            self.max_speed
        } else {
            0.0
        };
        self.position.y += self.speed_y;

        for projectile in self.projectiles.iter_mut() {
            projectile.update();
        }
        self.projectiles
            .retain(|projectile| !projectile.marked_for_deletion);
    }

    /// Fires from the player's top left corner, a no-op without ammo
    pub fn shoot_top(&mut self, ammo: &mut u32) {
        if *ammo > 0 {
            self.projectiles.push(Projectile::new(
                self.position,
                &self.projectile_config,
                self.playfield,
            ));
            *ammo -= 1;
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        renderer.fill_rect(&self.bounding_box(), COLOR);
        for projectile in &self.projectiles {
            projectile.draw(renderer);
        }
    }

    #[cfg(test)]
    pub fn speed_y(&self) -> f64 {
        self.speed_y
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }
}

impl Bounded for Player {
    fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}
