use crate::browser;
use crate::config::{EnemyConfig, GameConfig};
use crate::controls::{HeldKeys, InputHandler};
use crate::engine::input::InputEvent;
use crate::engine::{Game, Point, Rect, Renderer, Size, Timer};
use crate::entities::{Bounded, Enemy, EnemyKind, Player};
use crate::ui::Hud;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// ┌──────────────────────── Frame Overview ─────────────────────────┐
/// │                                                                 │
/// │  GameLoop (engine.rs)        Shooter (game.rs)                  │
/// │  ┌────────────────┐  input   ┌───────────────────────────────┐  │
/// │  │ drain channel  ├─────────►│ InputHandler -> Battle        │  │
/// │  │ delta = t - t0 │  update  │ 1. player + projectiles       │  │
/// │  │                ├─────────►│ 2. ammo timer                 │  │
/// │  │                │          │ 3. enemies + collisions       │  │
/// │  │                │          │ 4. prune enemies              │  │
/// │  │                │   draw   │ 5. spawn timer                │  │
/// │  │                ├─────────►│ player -> hud -> enemies      │  │
/// │  └────────────────┘          └───────────────────────────────┘  │
/// │                                                                 │
/// └─────────────────────────────────────────────────────────────────┘
pub enum Shooter {
    /// waiting for initialize() to fetch the config
    Loading,

    /// battle in progress (or finished)
    Loaded(Battle),
}

impl Shooter {
    const CONFIG_PATH: &'static str = "config.json";

    pub fn new() -> Self {
        Shooter::Loading
    }

    async fn load_config() -> Result<GameConfig> {
        browser::fetch_json::<GameConfig>(Self::CONFIG_PATH)
            .await
            .with_context(|| format!("Failed to load game config from : {}", Self::CONFIG_PATH))
    }
}

impl Default for Shooter {
    fn default() -> Self {
        Shooter::new()
    }
}

#[async_trait(?Send)]
impl Game for Shooter {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Shooter::Loading => {
                let config = Self::load_config().await.unwrap_or_else(|err| {
                    log::warn!("{:#}, using defaults", err);
                    GameConfig::default()
                });
                log::set_max_level(config.log_level);
                browser::resize_canvas(
                    config.playfield.width as u32,
                    config.playfield.height as u32,
                )?;
                let battle = Battle::new(config);
                log::info!(
                    "Battle started on a {}x{} playfield",
                    battle.playfield.width,
                    battle.playfield.height
                );
                Ok(Box::new(Shooter::Loaded(battle)))
            }
            Shooter::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        if let Shooter::Loaded(battle) = self {
            InputHandler::handle(&event, battle);
        }
    }

    fn update(&mut self, delta: f64) {
        if let Shooter::Loaded(battle) = self {
            battle.update(delta);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let Shooter::Loaded(battle) = self {
            renderer.clear(&Rect::new(Point::default(), battle.playfield));
            battle.draw(renderer);
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Shooter::Loaded(battle) => battle.game_over && battle.halt_on_game_over,
            Shooter::Loading => false,
        }
    }
}

/// Strict AABB overlap between two entities
/// - symmetric
/// - touching edges are not a hit
pub fn check_collision(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounding_box().intersects(&b.bounding_box())
}

#[derive(Serialize)]
pub struct Battle {
    playfield: Size,
    player: Player,
    keys: HeldKeys,
    ammo: u32,
    max_ammo: u32,
    ammo_timer: Timer,
    enemies: Vec<Enemy>,
    enemy_timer: Timer,
    score: u32,
    winning_score: u32,
    game_over: bool,
    halt_on_game_over: bool,
    #[serde(skip)]
    enemy_config: EnemyConfig,
    #[serde(skip)]
    hud: Hud,
    #[serde(skip)]
    rng: StdRng,
}

impl Battle {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Battle {
            playfield: config.playfield,
            player: Player::new(&config.player, &config.projectile, config.playfield),
            keys: HeldKeys::default(),
            ammo: config.ammo.initial,
            max_ammo: config.ammo.max,
            ammo_timer: Timer::new(config.ammo.interval),
            enemies: Vec::new(),
            enemy_timer: Timer::new(config.enemy.interval),
            score: 0,
            winning_score: config.winning_score,
            game_over: false,
            halt_on_game_over: config.halt_on_game_over,
            enemy_config: config.enemy,
            hud: Hud::new(&config.ui),
            rng,
        }
    }

    pub fn update(&mut self, delta: f64) {
        self.player.update(&self.keys);

        // the timer restarts even when the magazine is already full
        if self.ammo_timer.tick(delta) && self.ammo < self.max_ammo {
            self.ammo += 1;
        }

        for enemy in self.enemies.iter_mut() {
            enemy.update();
            if check_collision(&self.player, &*enemy) {
                enemy.marked_for_deletion = true;
            }
            for projectile in self.player.projectiles_mut() {
                if check_collision(&*projectile, &*enemy) {
                    projectile.marked_for_deletion = true;
                    enemy.health -= 1;
                    if enemy.health <= 0 {
                        enemy.marked_for_deletion = true;
                        self.score += 1;
                        log::debug!("{:?} destroyed, score {}", enemy.kind, self.score);
                        if self.score > self.winning_score && !self.game_over {
                            log::info!("Game over with score {}", self.score);
                            self.game_over = true;
                        }
                    }
                }
            }
        }
        // single prune, every projectile has had its shot at every enemy
        self.enemies.retain(|enemy| !enemy.marked_for_deletion);

        if self.enemy_timer.tick(delta) {
            self.add_enemy();
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        // order : player -> hud -> enemies (enemies end up on top)
        self.player.draw(renderer);
        self.hud.draw(renderer, self.score, self.ammo);
        for enemy in &self.enemies {
            enemy.draw(renderer);
        }
    }

    pub fn shoot_top(&mut self) {
        self.player.shoot_top(&mut self.ammo);
    }

    /// Dumps the battle to the dev tools console
    pub fn inspect(&self) {
        if let Err(err) = browser::log_value("battle", self) {
            log::error!("{:#}", err);
        }
    }

    fn add_enemy(&mut self) {
        self.enemies.push(Enemy::spawn(
            EnemyKind::Angler1,
            &self.enemy_config,
            self.playfield,
            &mut self.rng,
        ));
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn keys(&self) -> &HeldKeys {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut HeldKeys {
        &mut self.keys
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod canvas_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn offscreen_context() -> CanvasRenderingContext2d {
        let canvas = browser::document()
            .unwrap()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(500);
        canvas.set_height(500);
        canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap()
    }

    fn pixel(context: &CanvasRenderingContext2d, x: f64, y: f64) -> Vec<u8> {
        context.get_image_data(x, y, 1.0, 1.0).unwrap().data().to_vec()
    }

    #[wasm_bindgen_test]
    fn hud_and_enemies_are_drawn_over_the_player() {
        let context = offscreen_context();
        let renderer = Renderer::new(context.clone());
        let mut battle = Battle::new(GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        });
        // player box 20..140 x 30..220, under the ammo bars
        battle.player.position.y = 30.0;
        battle
            .enemies
            .push(Enemy::new(EnemyKind::Angler1, Point { x: 100.0, y: 150.0 }, 0.0, 3));

        battle.draw(&renderer);

        // plain player
        assert_eq!(pixel(&context, 30.0, 200.0), vec![0, 0, 0, 255]);
        // first ammo bar (70..72 x 35..50)
        assert_eq!(pixel(&context, 70.0, 40.0), vec![255, 255, 255, 255]);
        // enemy body overlapping the player
        assert_eq!(pixel(&context, 130.0, 175.0), vec![255, 0, 0, 255]);
    }
}
