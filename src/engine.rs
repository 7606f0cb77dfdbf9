use crate::browser;
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::CanvasRenderingContext2d;

use self::input::InputEvent;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn handle_input(&mut self, event: InputEvent);
    fn update(&mut self, delta: f64);
    fn draw(&self, renderer: &Renderer);
    /// Once true the loop stops calling update(), input and draw keep running
    fn is_finished(&self) -> bool {
        false
    }
}

pub struct GameLoop {
    last_frame: f64,
    halted: bool,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut receiver = input::prepare_input()?;
        let mut game_loop = GameLoop::new(browser::now()?);
        let renderer = Renderer::new(browser::context()?);
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            game_loop.step(&mut *game, input::drain(&mut receiver), perf);
            game.draw(&renderer);
            if let Some(closure) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(closure) {
                    log::error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }

    fn new(last_frame: f64) -> Self {
        GameLoop {
            last_frame,
            halted: false,
        }
    }

    /// One frame minus drawing : input -> update
    /// - input is always handled, so a finished game can still be inspected
    /// - update is skipped once the game reports it is finished
    fn step(&mut self, game: &mut dyn Game, events: Vec<InputEvent>, perf: f64) {
        for event in events {
            game.handle_input(event);
        }
        let delta = self.tick(perf);
        if game.is_finished() {
            if !self.halted {
                log::info!("GameLoop: game finished, simulation frozen");
                self.halted = true;
            }
            return;
        }
        game.update(delta);
    }

    /// time in milliseconds since the previous frame
    fn tick(&mut self, perf: f64) -> f64 {
        let delta = perf - self.last_frame;
        self.last_frame = perf;
        delta
    }
}

/// Accumulating frame timer
/// - compares BEFORE accumulating, so the frame that fires drops its delta
/// - restarts from zero whenever it fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timer {
    elapsed: f64,
    interval: f64,
}

impl Timer {
    pub fn new(interval: f64) -> Self {
        Timer {
            elapsed: 0.0,
            interval,
        }
    }

    /// Returns true on the frame `elapsed` has exceeded `interval`
    pub fn tick(&mut self, delta: f64) -> bool {
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            true
        } else {
            self.elapsed += delta;
            false
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub const fn new_from_x_y(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn right(&self) -> f64 {
        self.x() + self.width()
    }

    pub fn bottom(&self) -> f64 {
        self.y() + self.height()
    }

    /// Axis aligned overlap, strict on all four sides
    /// - touching edges do NOT intersect
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.x() < rect.right()
            && self.right() > rect.x()
            && self.y() < rect.bottom()
            && self.bottom() > rect.y()
    }
}

pub struct Shadow<'a> {
    pub offset: Point,
    pub color: &'a str,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x(), rect.y(), rect.width(), rect.height());
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(rect.x(), rect.y(), rect.width(), rect.height());
    }

    pub fn fill_text(&self, text: &str, position: &Point, font: &str, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.set_font(font);
        // canvas only throws here for a detached context, skip the text and keep the frame
        if let Err(err) = self.context.fill_text(text, position.x, position.y) {
            log::error!("Renderer: could not draw text '{}' : {:#?}", text, err);
        }
    }

    /// Runs `draw` between save()/restore() with a drop shadow applied
    /// - styles set inside `draw` do not leak into later draw calls
    pub fn with_shadow(&self, shadow: &Shadow, draw: impl FnOnce(&Renderer)) {
        self.context.save();
        self.context.set_shadow_offset_x(shadow.offset.x);
        self.context.set_shadow_offset_y(shadow.offset.y);
        self.context.set_shadow_color(shadow.color);
        draw(self);
        self.context.restore();
    }
}

/// Keyboard and pointer plumbing
/// - DOM closures push InputEvents into an unbounded channel
/// - GameLoop drains the channel at the top of every frame
pub mod input {
    use crate::browser;
    use anyhow::{anyhow, Result};
    use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
    use wasm_bindgen::JsCast;
    use web_sys::{Event, EventTarget, KeyboardEvent};

    pub const INSPECT_BUTTON_ID: &str = "btn";

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum InputEvent {
        /// KeyboardEvent.code of a pressed key
        KeyDown(String),
        /// KeyboardEvent.code of a released key
        KeyUp(String),
        /// request to dump the current game state to the console
        Inspect,
    }

    pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
        let (sender, receiver) = unbounded();
        let window = browser::window()?;
        let target: &EventTarget = window.as_ref();

        let keydown_sender = sender.clone();
        listen(target, "keydown", move |event: KeyboardEvent| {
            send(&keydown_sender, InputEvent::KeyDown(event.code()));
        })?;

        let keyup_sender = sender.clone();
        listen(target, "keyup", move |event: KeyboardEvent| {
            send(&keyup_sender, InputEvent::KeyUp(event.code()));
        })?;

        // the inspect button is optional page furniture
        match browser::element_by_id(INSPECT_BUTTON_ID) {
            Ok(button) => listen(button.as_ref(), "click", move |_: Event| {
                send(&sender, InputEvent::Inspect);
            })?,
            Err(err) => log::warn!("Inspect button disabled : {:#}", err),
        }

        Ok(receiver)
    }

    /// Empties the channel without blocking
    /// try_next() yields :
    /// - Ok(Some(event)) -> queued event
    /// - Ok(None)        -> every sender dropped
    /// - Err(_)          -> nothing queued right now
    pub fn drain(receiver: &mut UnboundedReceiver<InputEvent>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = receiver.try_next() {
            events.push(event);
        }
        events
    }

    fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
        if let Err(err) = sender.unbounded_send(event) {
            log::warn!("input channel closed : {}", err);
        }
    }

    fn listen<E>(target: &EventTarget, event_type: &str, f: impl FnMut(E) + 'static) -> Result<()>
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
    {
        let closure = browser::closure_wrap(Box::new(f) as Box<dyn FnMut(E)>);
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for '{}' : {:#?}", event_type, err))?;
        // the page owns the listener from here on
        closure.forget();
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn drain_returns_events_in_arrival_order() {
            let (sender, mut receiver) = unbounded();
            sender
                .unbounded_send(InputEvent::KeyDown("ArrowUp".into()))
                .unwrap();
            sender.unbounded_send(InputEvent::Inspect).unwrap();
            sender
                .unbounded_send(InputEvent::KeyUp("ArrowUp".into()))
                .unwrap();

            assert_eq!(
                drain(&mut receiver),
                vec![
                    InputEvent::KeyDown("ArrowUp".into()),
                    InputEvent::Inspect,
                    InputEvent::KeyUp("ArrowUp".into()),
                ]
            );
            assert!(drain(&mut receiver).is_empty());
        }

        #[test]
        fn drain_on_closed_channel_is_empty() {
            let (sender, mut receiver) = unbounded::<InputEvent>();
            drop(sender);
            assert!(drain(&mut receiver).is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Counts calls, finishes after `finish_after` updates
    #[derive(Default)]
    struct CountingGame {
        events: Vec<InputEvent>,
        updates: u32,
        finish_after: u32,
    }

    #[async_trait(?Send)]
    impl Game for CountingGame {
        async fn initialize(&self) -> Result<Box<dyn Game>> {
            Err(anyhow!("not used"))
        }

        fn handle_input(&mut self, event: InputEvent) {
            self.events.push(event);
        }

        fn update(&mut self, _delta: f64) {
            self.updates += 1;
        }

        fn draw(&self, _renderer: &Renderer) {}

        fn is_finished(&self) -> bool {
            self.updates >= self.finish_after
        }
    }

    #[test]
    fn step_handles_input_before_update() {
        let mut game_loop = GameLoop::new(0.0);
        let mut game = CountingGame {
            finish_after: 10,
            ..CountingGame::default()
        };
        game_loop.step(&mut game, vec![InputEvent::KeyDown("Space".into())], 16.0);
        assert_eq!(game.events, vec![InputEvent::KeyDown("Space".into())]);
        assert_eq!(game.updates, 1);
    }

    #[test]
    fn finished_game_still_receives_input_but_not_updates() {
        let mut game_loop = GameLoop::new(0.0);
        let mut game = CountingGame {
            finish_after: 1,
            ..CountingGame::default()
        };
        game_loop.step(&mut game, Vec::new(), 16.0);
        assert!(game.is_finished());

        for frame in 2..5 {
            game_loop.step(&mut game, vec![InputEvent::Inspect], 16.0 * frame as f64);
        }
        assert_eq!(game.updates, 1);
        assert_eq!(game.events, vec![InputEvent::Inspect; 3]);
        assert!(game_loop.halted);
    }

    #[test]
    fn tick_measures_time_since_previous_frame() {
        let mut game_loop = GameLoop::new(100.0);
        assert_relative_eq!(game_loop.tick(116.5), 16.5);
        assert_relative_eq!(game_loop.tick(150.0), 33.5);
    }

    #[test]
    fn timer_fires_only_after_exceeding_interval() {
        let mut timer = Timer::new(500.0);
        let fired: Vec<bool> = (0..7).map(|_| timer.tick(100.0)).collect();
        // 0,100,..,500 are not > 500; 600 is
        assert_eq!(fired, vec![false, false, false, false, false, false, true]);
        assert_relative_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn timer_drops_delta_of_firing_frame() {
        let mut timer = Timer::new(10.0);
        assert!(!timer.tick(20.0));
        assert!(timer.tick(20.0));
        assert_relative_eq!(timer.elapsed(), 0.0);
        assert!(!timer.tick(5.0));
        assert_relative_eq!(timer.elapsed(), 5.0);
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new_from_x_y(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new_from_x_y(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn contained_rect_intersects() {
        let outer = Rect::new_from_x_y(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new_from_x_y(40.0, 40.0, 2.0, 2.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn edge_adjacent_rects_do_not_intersect() {
        let a = Rect::new_from_x_y(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new_from_x_y(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new_from_x_y(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new_from_x_y(10.0, 10.0, 10.0, 10.0);
        for other in [right, below, corner] {
            assert!(!a.intersects(&other));
            assert!(!other.intersects(&a));
        }
    }

    #[test]
    fn intersection_is_symmetric() {
        let rects = [
            Rect::new_from_x_y(0.0, 0.0, 10.0, 10.0),
            Rect::new_from_x_y(9.5, -3.0, 1.0, 4.0),
            Rect::new_from_x_y(-20.0, 2.0, 25.0, 1.0),
            Rect::new_from_x_y(10.0, 10.0, 0.0, 0.0),
            Rect::new_from_x_y(3.0, 3.0, 4.0, 4.0),
            Rect::new_from_x_y(100.0, 100.0, 5.0, 5.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.intersects(b), b.intersects(a), "{:?} vs {:?}", a, b);
            }
        }
    }
}
