use sdl2::keyboard::Scancode;

use crate::camera::Movement;

static BINDINGS: [(Scancode, Movement); 4] = [
    (Scancode::W, Movement::Forward),
    (Scancode::S, Movement::Backward),
    (Scancode::A, Movement::Left),
    (Scancode::D, Movement::Right),
];

/// Turns absolute cursor positions into look offsets.
///
/// The first sample after construction or [`CursorTracker::reset`] only
/// seeds the last known position, so regaining the cursor never makes the
/// view jump.
#[derive(Debug)]
pub struct CursorTracker {
    last: (f32, f32),
    first_sample: bool,
}

impl CursorTracker {
    pub fn new() -> CursorTracker {
        CursorTracker {
            last: (0., 0.),
            first_sample: true,
        }
    }

    pub fn reset(&mut self) {
        self.first_sample = true;
    }

    /// Returns `(dx, dy)` with `dy` positive when the cursor moves up.
    pub fn sample(&mut self, x: f32, y: f32) -> (f32, f32) {
        if self.first_sample {
            self.last = (x, y);
            self.first_sample = false;
        }

        let offset = (x - self.last.0, self.last.1 - y);
        self.last = (x, y);
        offset
    }
}

impl Default for CursorTracker {
    fn default() -> Self {
        CursorTracker::new()
    }
}

pub fn movements<F>(is_pressed: F) -> impl Iterator<Item = Movement>
    where
        F: Fn(Scancode) -> bool,
{
    BINDINGS
        .iter()
        .filter(move |(scancode, _)| is_pressed(*scancode))
        .map(|&(_, movement)| movement)
}

pub fn quit_requested<F>(is_pressed: F) -> bool
    where
        F: Fn(Scancode) -> bool,
{
    is_pressed(Scancode::Escape)
}
