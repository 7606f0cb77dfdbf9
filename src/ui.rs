use crate::config::UiConfig;
use crate::engine::{Point, Rect, Renderer, Shadow};

const SHADOW: Shadow<'static> = Shadow {
    offset: Point { x: 2.0, y: 2.0 },
    color: "black",
};
const AMMO_FONT: &str = "20px Helvetica";

/// Score and ammo readout, drawn from the live battle values every frame
pub struct Hud {
    font: String,
    color: String,
}

impl Hud {
    pub fn new(config: &UiConfig) -> Self {
        Hud {
            font: format!("{}px {}", config.font_size, config.font_family),
            color: config.color.clone(),
        }
    }

    pub fn draw(&self, renderer: &Renderer, score: u32, ammo: u32) {
        renderer.with_shadow(&SHADOW, |renderer| {
            renderer.fill_text(
                &format!("Scores: {}", score),
                &Point { x: 5.0, y: 25.0 },
                &self.font,
                &self.color,
            );
            renderer.fill_text("Ammo", &Point { x: 5.0, y: 50.0 }, AMMO_FONT, &self.color);
            for bar in ammo_bars(ammo) {
                renderer.fill_rect(&bar, &self.color);
            }
        });
    }
}

/// One 2x15 bar per round, 5px apart, starting right of the "Ammo" label
fn ammo_bars(ammo: u32) -> impl Iterator<Item = Rect> {
    (0..ammo).map(|round| Rect::new_from_x_y(70.0 + 5.0 * round as f64, 35.0, 2.0, 15.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_bar_per_round() {
        assert_eq!(ammo_bars(0).count(), 0);
        assert_eq!(ammo_bars(25).count(), 25);
    }

    #[test]
    fn bars_step_five_pixels() {
        let bars: Vec<Rect> = ammo_bars(3).collect();
        assert_relative_eq!(bars[0].x(), 70.0);
        assert_relative_eq!(bars[1].x(), 75.0);
        assert_relative_eq!(bars[2].x(), 80.0);
        assert!(bars.iter().all(|bar| bar.y() == 35.0 && bar.height() == 15.0));
    }

    #[test]
    fn font_comes_from_config() {
        let hud = Hud::new(&UiConfig::default());
        assert_eq!(hud.font, "25px Helvetica");
        assert_eq!(hud.color, "white");
    }
}
