use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;

use dvd_framework::coords::{Rect as Bounds, Vec2, Viewport};
use dvd_framework::core::{App, AppControl, FrameCtx};
use dvd_framework::device::GpuInit;
use dvd_framework::input::{InputFrame, InputState, Key, MouseButton};
use dvd_framework::paint::Color;
use dvd_framework::render::shapes::rect::RectRenderer;
use dvd_framework::render::{Projection, ShaderManager};
use dvd_framework::scene::{DrawList, ZIndex};
use dvd_framework::time::FrameTime;
use dvd_framework::window::{Runtime, RuntimeConfig};

use crate::config::BounceConfig;
use crate::font::FontRenderer;
use crate::shapes::Rect;

/// Window size in logical pixels. The window is not resizable.
pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;

const CLEAR: Color = Color::from_premul(0.02, 0.02, 0.04, 1.0);
const OVERLAY_TEXT_SIZE: f32 = 20.0;

const Z_DVD: ZIndex = ZIndex::new(0);
const Z_CONFETTI: ZIndex = ZIndex::new(1);
const Z_OVERLAY: ZIndex = ZIndex::new(2);

/// Keys tracked in the key map.
const TRACKED_KEYS: [Key; 4] = [Key::Escape, Key::Q, Key::C, Key::Space];

/// The bouncing-rectangle demo.
///
/// Call order: `init_window`, `init_shaders`, `init_shapes`, then `run`.
/// Each frame runs `process_input`, `update` and `render` until `should_close`.
pub struct Engine {
    config: BounceConfig,
    window: Option<(RuntimeConfig, GpuInit)>,

    shader_manager: Option<ShaderManager>,
    font_renderer: Option<FontRenderer>,
    rect_renderer: Option<RectRenderer>,
    draw_list: DrawList,
    projection: Projection,

    dvd: Option<Rect>,
    confetti: VecDeque<Rect>,
    rng: StdRng,

    keys: HashMap<Key, bool>,
    mouse: Vec2,
    mouse_pressed_last_frame: bool,
    paused: bool,
    close_requested: bool,

    started: Instant,
    pub delta_time: f32,
    pub last_frame: f32,

    pub walls_hit: u32,
    pub corners_hit: u32,
    pub confetti_on_screen: bool,
}

impl Engine {
    pub fn new(config: BounceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            window: None,
            shader_manager: None,
            font_renderer: None,
            rect_renderer: None,
            draw_list: DrawList::new(),
            projection: Projection::orthographic(Viewport::new(WIDTH, HEIGHT)),
            dvd: None,
            confetti: VecDeque::new(),
            rng,
            keys: TRACKED_KEYS.iter().map(|k| (*k, false)).collect(),
            mouse: Vec2::zero(),
            mouse_pressed_last_frame: false,
            paused: false,
            close_requested: false,
            started: Instant::now(),
            delta_time: 0.0,
            last_frame: 0.0,
            walls_hit: 0,
            corners_hit: 0,
            confetti_on_screen: false,
        }
    }

    // ── initialization ────────────────────────────────────────────────────

    /// Configures the fixed-size window and the GPU context.
    ///
    /// Both are created when `run` starts the event loop; a failure there is
    /// returned from `run`.
    pub fn init_window(&mut self, debug: bool) {
        let window = RuntimeConfig {
            title: self.config.title.clone(),
            initial_size: LogicalSize::new(WIDTH as f64, HEIGHT as f64),
            resizable: false,
        };
        let gpu = GpuInit { debug, ..GpuInit::default() };

        log::debug!("window configured: {WIDTH}x{HEIGHT}, debug={debug}");
        self.window = Some((window, gpu));
    }

    /// Loads the shape and text programs and builds the renderers.
    pub fn init_shaders(&mut self) -> Result<()> {
        let mut shaders = ShaderManager::with_builtins();
        if let Some(dir) = &self.config.shader_dir {
            let n = shaders
                .load_dir(dir)
                .with_context(|| format!("failed to load shaders from {}", dir.display()))?;
            log::info!("{n} shader override(s) loaded from {}", dir.display());
        }

        let shaders = self.shader_manager.insert(shaders);
        let shape = shaders.get(ShaderManager::SHAPE)?.clone();
        let text = shaders.get(ShaderManager::TEXT)?.clone();
        log::info!("{} shaders loaded", shaders.len());

        self.font_renderer = Some(FontRenderer::load(text, self.config.font_path.as_deref())?);
        self.rect_renderer = Some(RectRenderer::new(shape));
        Ok(())
    }

    /// Places the dvd rectangle at the window center with its starting velocity.
    pub fn init_shapes(&mut self) {
        let [w, h] = self.config.dvd_size;
        let [vx, vy] = self.config.dvd_speed;
        let [r, g, b] = self.config.dvd_color;

        self.dvd = Some(Rect::new(
            Vec2::new(WIDTH * 0.5, HEIGHT * 0.5),
            Vec2::new(w, h),
            Vec2::new(vx, vy),
            Color::from_srgb_u8(r, g, b, 255),
        ));
    }

    /// Hands the engine to the event loop. Returns when the window closes.
    pub fn run(mut self) -> Result<()> {
        let (window, gpu) = self
            .window
            .take()
            .context("init_window must be called before run")?;
        Runtime::run(window, gpu, self)
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Folds this frame's keyboard and mouse input into the engine state.
    ///
    /// The key map mirrors `input` each frame, so keys dropped on focus loss
    /// read as released here too.
    pub fn process_input(&mut self, input: &InputState, frame: &InputFrame) {
        for key in TRACKED_KEYS {
            self.keys.insert(key, input.key_down(key));
        }

        if let Some((x, y)) = input.pointer_pos {
            self.mouse = Vec2::new(x, y);
        }

        let close_key = |k| self.key_down(k) || frame.key_pressed(k);
        if close_key(Key::Escape) || close_key(Key::Q) {
            self.close_requested = true;
        }
        if frame.key_pressed(Key::C) {
            log::debug!("clearing {} confetti", self.confetti.len());
            self.confetti.clear();
            self.confetti_on_screen = false;
        }
        if frame.key_pressed(Key::Space) {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }

        // A press and release inside one frame still counts as a click.
        let mouse_down =
            input.button_down(MouseButton::Left) || frame.button_pressed(MouseButton::Left);
        if mouse_down && !self.mouse_pressed_last_frame {
            let at = self.mouse;
            self.spawn_confetti_at(at);
        }
        self.mouse_pressed_last_frame = mouse_down;
    }

    /// Appends one confetti piece at a random position inside the window.
    pub fn spawn_confetti(&mut self) {
        let at = Vec2::new(self.rng.gen_range(0.0..WIDTH), self.rng.gen_range(0.0..HEIGHT));
        self.spawn_confetti_at(at);
    }

    fn spawn_confetti_at(&mut self, position: Vec2) {
        let speed = self.config.confetti_speed.max(1.0);
        let velocity = Vec2::new(
            self.rng.gen_range(-speed..=speed),
            self.rng.gen_range(-speed..=speed),
        );
        let color = Color::from_straight(
            self.rng.gen_range(0.2..=1.0),
            self.rng.gen_range(0.2..=1.0),
            self.rng.gen_range(0.2..=1.0),
            1.0,
        );
        let size = self.config.confetti_size;

        if self.confetti.len() >= self.config.max_confetti.max(1) {
            self.confetti.pop_front();
        }
        self.confetti.push_back(Rect::new(position, Vec2::new(size, size), velocity, color));
        self.confetti_on_screen = true;
    }

    /// Advances the simulation by the frame's delta time.
    pub fn update(&mut self, time: FrameTime) {
        self.delta_time = time.dt;
        self.last_frame = time.now.saturating_duration_since(self.started).as_secs_f32();

        if !self.paused {
            self.step(time.dt);
        }
    }

    fn step(&mut self, dt: f32) {
        if let Some(mut dvd) = self.dvd.take() {
            dvd.advance(dt);
            self.check_bounds(&mut dvd);
            self.dvd = Some(dvd);
        }

        let mut confetti = std::mem::take(&mut self.confetti);
        confetti.retain_mut(|piece| {
            piece.advance(dt);
            self.check_confetti_bounds(piece)
        });
        self.confetti = confetti;
        self.confetti_on_screen = !self.confetti.is_empty();
    }

    /// Draws the dvd rectangle, the confetti and the hit counters.
    pub fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.build_draw_list();

        let (Some(rects), Some(text)) = (self.rect_renderer.as_mut(), self.font_renderer.as_mut())
        else {
            return AppControl::Continue;
        };
        let list = &mut self.draw_list;

        ctx.render(self.projection, CLEAR, |rctx, target| {
            rects.render(rctx, target, &mut *list);
            text.render(rctx, target, list);
        })
    }

    fn build_draw_list(&mut self) {
        self.draw_list.clear();

        if let Some(dvd) = &self.dvd {
            self.draw_list.push_rect(Z_DVD, dvd.bounds(), dvd.color);
        }
        for piece in &self.confetti {
            self.draw_list.push_rect(Z_CONFETTI, piece.bounds(), piece.color);
        }

        let Some(font) = &self.font_renderer else { return };
        let mut counters = format!("Walls hit: {}   Corners hit: {}", self.walls_hit, self.corners_hit);
        if self.confetti_on_screen {
            counters.push_str(&format!("   Confetti: {}", self.confetti.len()));
        }
        if self.delta_time > 0.0 {
            counters.push_str(&format!("   {:.0} fps", 1.0 / self.delta_time));
        }
        font.push_text(
            &mut self.draw_list,
            Z_OVERLAY,
            counters,
            Vec2::new(10.0, 10.0),
            OVERLAY_TEXT_SIZE,
            Color::WHITE,
        );

        if self.paused {
            let label = "PAUSED";
            let extent = font.measure(label, OVERLAY_TEXT_SIZE);
            font.push_text(
                &mut self.draw_list,
                Z_OVERLAY,
                label,
                Vec2::new((WIDTH - extent.x) * 0.5, (HEIGHT - extent.y) * 0.5),
                OVERLAY_TEXT_SIZE,
                Color::WHITE,
            );
        }
    }

    // ── collisions ────────────────────────────────────────────────────────

    /// Keeps `rect` inside the window, reflecting it off any crossed edge.
    ///
    /// A frame with any collision counts one wall hit. Crossing both axes at
    /// once also counts a corner hit and spawns one confetti piece.
    pub fn check_bounds(&mut self, rect: &mut Rect) {
        let b = rect.bounds();
        let (min, max) = (b.min(), b.max());
        let half = rect.half_size();

        // Center limits; an oversized rect is pinned to the middle.
        let lo = Vec2::new(half.x.min(WIDTH * 0.5), half.y.min(HEIGHT * 0.5));
        let hi = Vec2::new(WIDTH - lo.x, HEIGHT - lo.y);

        let mut hit_x = true;
        if min.x < 0.0 {
            rect.position.x = lo.x;
            rect.velocity.x = rect.velocity.x.abs();
        } else if max.x > WIDTH {
            rect.position.x = hi.x;
            rect.velocity.x = -rect.velocity.x.abs();
        } else {
            hit_x = false;
        }

        let mut hit_y = true;
        if min.y < 0.0 {
            rect.position.y = lo.y;
            rect.velocity.y = rect.velocity.y.abs();
        } else if max.y > HEIGHT {
            rect.position.y = hi.y;
            rect.velocity.y = -rect.velocity.y.abs();
        } else {
            hit_y = false;
        }

        if hit_x || hit_y {
            self.walls_hit += 1;
            log::debug!("wall hit #{} at {:?}", self.walls_hit, rect.position);
        }
        if hit_x && hit_y {
            self.corners_hit += 1;
            log::info!("corner hit #{}", self.corners_hit);
            self.spawn_confetti();
        }
    }

    /// Whether a confetti piece is still at least partly visible.
    pub fn check_confetti_bounds(&self, rect: &Rect) -> bool {
        rect.bounds().intersect(Bounds::new(0.0, 0.0, WIDTH, HEIGHT)).is_some()
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }
}

impl App for Engine {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested) {
            self.close_requested = true;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.process_input(ctx.input, ctx.input_frame);
        let control = if self.should_close() {
            AppControl::Exit
        } else {
            self.update(ctx.time);
            self.render(ctx)
        };

        if control == AppControl::Exit || self.should_close() {
            log::info!(
                "closing after {:.1}s: {} wall hits, {} corner hits",
                self.last_frame,
                self.walls_hit,
                self.corners_hit
            );
            return AppControl::Exit;
        }
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvd_framework::input::{
        InputEvent, KeyState, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    };

    const DT: f32 = 1.0 / 60.0;

    fn engine() -> Engine {
        let mut e = Engine::new(BounceConfig { seed: Some(7), ..BounceConfig::default() });
        e.init_shapes();
        e
    }

    fn place_dvd(e: &mut Engine, position: Vec2, velocity: Vec2) {
        let dvd = e.dvd.as_mut().unwrap();
        dvd.position = position;
        dvd.velocity = velocity;
    }

    fn key(k: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key: k, state, repeat: false }
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    // ── init ──────────────────────────────────────────────────────────────

    #[test]
    fn dvd_starts_centered() {
        let e = engine();
        let dvd = e.dvd.as_ref().unwrap();
        assert_eq!(dvd.position, Vec2::new(400.0, 300.0));
        assert_eq!(dvd.velocity, Vec2::new(180.0, 140.0));
    }

    #[test]
    fn init_window_records_fixed_size() {
        let mut e = engine();
        e.init_window(true);
        let (window, gpu) = e.window.as_ref().unwrap();
        assert_eq!(window.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(!window.resizable);
        assert!(gpu.debug);
    }

    #[test]
    fn run_without_init_window_fails() {
        assert!(engine().run().is_err());
    }

    #[test]
    fn bad_font_path_fails_init_shaders() {
        let mut e = Engine::new(BounceConfig {
            font_path: Some("/nonexistent/font.ttf".into()),
            ..BounceConfig::default()
        });
        assert!(e.init_shaders().is_err());
        assert!(e.font_renderer.is_none());
    }

    #[test]
    fn broken_shader_override_fails_init_shaders() {
        let dir = std::env::temp_dir().join(format!("dvd-bounce-shaders-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("shape.wgsl"), "this is not wgsl").unwrap();

        let mut e = Engine::new(BounceConfig { shader_dir: Some(dir.clone()), ..BounceConfig::default() });
        let err = e.init_shaders().unwrap_err();

        assert!(format!("{err:#}").contains("not valid WGSL"));
        assert!(e.rect_renderer.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    // ── collisions ────────────────────────────────────────────────────────

    #[test]
    fn corner_hit_reflects_both_axes_and_spawns_once() {
        let mut e = engine();
        place_dvd(&mut e, Vec2::new(0.0, 0.0), Vec2::new(-1.0, -1.0));

        e.step(DT);

        let dvd = e.dvd.as_ref().unwrap();
        assert_eq!(dvd.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(e.corners_hit, 1);
        assert_eq!(e.walls_hit, 1);
        assert_eq!(e.confetti.len(), 1);
        assert!(e.confetti_on_screen);
    }

    #[test]
    fn corner_hit_through_update_records_frame_time() {
        let mut e = engine();
        place_dvd(&mut e, Vec2::new(0.0, 0.0), Vec2::new(-1.0, -1.0));
        let now = e.started + std::time::Duration::from_millis(500);

        e.update(FrameTime { dt: DT, now, frame_index: 30 });

        assert_eq!(e.dvd.as_ref().unwrap().velocity, Vec2::new(1.0, 1.0));
        assert_eq!((e.walls_hit, e.corners_hit), (1, 1));
        assert_eq!(e.confetti.len(), 1);
        assert_eq!(e.delta_time, DT);
        assert!((e.last_frame - 0.5).abs() < 1e-6);
    }

    #[test]
    fn single_wall_flips_only_that_axis() {
        let mut e = engine();
        place_dvd(&mut e, Vec2::new(795.0, 300.0), Vec2::new(120.0, -40.0));

        e.step(DT);

        let dvd = e.dvd.as_ref().unwrap();
        assert_eq!(dvd.velocity, Vec2::new(-120.0, -40.0));
        assert_eq!(dvd.position.x, 800.0 - 60.0);
        assert_eq!(e.walls_hit, 1);
        assert_eq!(e.corners_hit, 0);
        assert!(e.confetti.is_empty());
    }

    #[test]
    fn no_hit_in_open_space() {
        let mut e = engine();
        e.step(DT);
        assert_eq!((e.walls_hit, e.corners_hit), (0, 0));
    }

    #[test]
    fn dvd_stays_in_window_over_many_frames() {
        let mut e = Engine::new(BounceConfig {
            seed: Some(1),
            dvd_speed: [937.0, 611.0],
            ..BounceConfig::default()
        });
        e.init_shapes();

        let mut last = (0, 0);
        for _ in 0..20_000 {
            e.step(DT);
            let b = e.dvd.as_ref().unwrap().bounds();
            assert!(b.min().x >= 0.0 && b.min().y >= 0.0);
            assert!(b.max().x <= WIDTH && b.max().y <= HEIGHT);
            assert!(e.walls_hit >= last.0 && e.corners_hit >= last.1);
            last = (e.walls_hit, e.corners_hit);
        }
        assert!(e.walls_hit > 0);
        assert!(e.confetti.len() <= e.config.max_confetti);
    }

    #[test]
    fn oversized_dvd_is_pinned_to_center() {
        let mut e = Engine::new(BounceConfig { dvd_size: [1000.0, 50.0], ..BounceConfig::default() });
        e.init_shapes();
        e.step(DT);
        assert_eq!(e.dvd.as_ref().unwrap().position.x, 400.0);
    }

    // ── confetti ──────────────────────────────────────────────────────────

    #[test]
    fn spawned_pieces_are_independent() {
        let mut e = engine();
        for _ in 0..5 {
            e.spawn_confetti();
        }
        assert_eq!(e.confetti.len(), 5);

        let before = e.confetti[1].position;
        e.confetti[0].position = Vec2::new(-1.0, -1.0);
        assert_eq!(e.confetti[1].position, before);

        let first = e.confetti[1].position;
        assert!(e.confetti.iter().skip(2).any(|c| c.position != first));
    }

    #[test]
    fn confetti_leaving_the_window_is_removed() {
        let mut e = engine();
        e.spawn_confetti();
        e.confetti[0].position = Vec2::new(-50.0, 300.0);
        e.confetti[0].velocity = Vec2::new(-10.0, 0.0);

        e.step(DT);

        assert!(e.confetti.is_empty());
        assert!(!e.confetti_on_screen);
    }

    #[test]
    fn confetti_partly_visible_survives() {
        let e = engine();
        let piece = Rect::new(Vec2::new(-2.0, 10.0), Vec2::new(10.0, 10.0), Vec2::zero(), Color::WHITE);
        assert!(e.check_confetti_bounds(&piece));
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut e = Engine::new(BounceConfig {
            seed: Some(2),
            max_confetti: 3,
            ..BounceConfig::default()
        });
        for _ in 0..3 {
            e.spawn_confetti();
        }
        let second = e.confetti[1].position;
        e.spawn_confetti();
        e.spawn_confetti();

        assert_eq!(e.confetti.len(), 3);
        // Pieces 0 and 1 were evicted; the old second is gone too.
        assert!(e.confetti.iter().all(|c| c.position != second));
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn click_spawns_one_piece_at_cursor() {
        let mut e = engine();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        input.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 120.0, y: 80.0 }));
        input.apply_event(&mut frame, left(MouseButtonState::Pressed, 120.0, 80.0));
        e.process_input(&input, &frame);
        assert_eq!(e.confetti.len(), 1);
        assert_eq!(e.confetti[0].position, Vec2::new(120.0, 80.0));

        // Held across frames: no new spawn.
        frame.clear();
        e.process_input(&input, &frame);
        assert_eq!(e.confetti.len(), 1);

        input.apply_event(&mut frame, left(MouseButtonState::Released, 120.0, 80.0));
        e.process_input(&input, &frame);
        assert!(!e.mouse_pressed_last_frame);
    }

    #[test]
    fn escape_closes_for_good() {
        let mut e = engine();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        assert!(!e.should_close());

        input.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        e.process_input(&input, &frame);
        assert!(e.should_close());

        frame.clear();
        input.apply_event(&mut frame, key(Key::Escape, KeyState::Released));
        e.process_input(&input, &frame);
        assert!(e.should_close());
        assert!(!e.key_down(Key::Escape));
    }

    #[test]
    fn tap_inside_one_frame_still_closes() {
        let mut e = engine();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, key(Key::Q, KeyState::Pressed));
        input.apply_event(&mut frame, key(Key::Q, KeyState::Released));
        e.process_input(&input, &frame);
        assert!(e.should_close());
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut e = engine();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        e.process_input(&input, &frame);
        assert!(e.key_down(Key::Space));

        frame.clear();
        input.apply_event(&mut frame, InputEvent::Focused(false));
        e.process_input(&input, &frame);
        assert!(!e.key_down(Key::Space));
        assert!(e.paused);
    }

    #[test]
    fn close_request_from_window_sets_flag() {
        let mut e = engine();
        assert_eq!(e.on_window_event(&WindowEvent::CloseRequested), AppControl::Continue);
        assert!(e.should_close());
    }

    #[test]
    fn c_clears_confetti() {
        let mut e = engine();
        e.spawn_confetti();
        e.spawn_confetti();

        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, key(Key::C, KeyState::Pressed));
        e.process_input(&input, &frame);

        assert!(e.confetti.is_empty());
        assert!(!e.confetti_on_screen);
    }

    #[test]
    fn space_pauses_simulation() {
        let mut e = engine();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        e.process_input(&input, &frame);
        assert!(e.paused);

        let before = e.dvd.as_ref().unwrap().position;
        e.update(FrameTime { dt: DT, now: Instant::now(), frame_index: 0 });
        assert_eq!(e.dvd.as_ref().unwrap().position, before);
        assert_eq!(e.delta_time, DT);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_list_has_dvd_and_confetti() {
        let mut e = engine();
        e.spawn_confetti();
        e.spawn_confetti();
        e.build_draw_list();
        // No font renderer in tests, so no overlay text.
        assert_eq!(e.draw_list.len(), 3);
    }
}
