use std::time::Instant;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

use crate::camera::Camera;
use crate::input::{self, CursorTracker};

/// Everything the event handlers and the frame loop mutate.
pub struct AppState {
    pub camera: Camera,
    cursor: CursorTracker,
    // relative mouse mode reports motion only, so positions are accumulated
    pointer: (f32, f32),
    last_frame: Instant,
    // last non-empty drawable size
    viewport: (u32, u32),
    resize_pending: bool,
    running: bool,
}

impl AppState {
    pub fn new(camera: Camera, viewport: (u32, u32)) -> AppState {
        AppState {
            camera,
            cursor: CursorTracker::new(),
            pointer: (viewport.0 as f32 / 2., viewport.1 as f32 / 2.),
            last_frame: Instant::now(),
            viewport: (viewport.0.max(1), viewport.1.max(1)),
            resize_pending: true,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.viewport;
        width.max(1) as f32 / height.max(1) as f32
    }

    /// Seconds elapsed since the previous call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    /// True once after the window reported a size change.
    pub fn take_resize(&mut self) -> bool {
        std::mem::replace(&mut self.resize_pending, false)
    }

    /// Records the drawable size read after a resize. An empty size, as
    /// reported for a minimized window, keeps the previous viewport and
    /// returns `false`.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::debug!("ignoring empty viewport {}x{}", width, height);
            return false;
        }

        self.viewport = (width, height);
        true
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.running = false,
            Event::Window { win_event, .. } => match win_event {
                // the drawable size can differ from the window size on high-dpi
                // displays, so the frame loop queries it instead
                WindowEvent::SizeChanged(..) => self.resize_pending = true,
                WindowEvent::FocusGained => {
                    log::debug!("focus gained, reseeding cursor");
                    self.cursor.reset();
                }
                _ => {}
            },
            Event::MouseMotion { xrel, yrel, .. } => {
                self.pointer.0 += *xrel as f32;
                self.pointer.1 += *yrel as f32;
                self.look_at_pointer();
            }
            Event::MouseWheel { y, .. } => self.camera.apply_scroll(*y as f32),
            _ => {}
        }
    }

    pub fn process_keyboard<F>(&mut self, is_pressed: F, dt: f32)
        where
            F: Fn(Scancode) -> bool,
    {
        if input::quit_requested(&is_pressed) {
            self.running = false;
            return;
        }

        for movement in input::movements(&is_pressed) {
            self.camera.apply_keyboard_move(movement, dt);
        }
    }

    fn look_at_pointer(&mut self) {
        let (dx, dy) = self.cursor.sample(self.pointer.0, self.pointer.1);
        self.camera.apply_mouse_look(dx, dy);
    }
}
