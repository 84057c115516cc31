use egui::{Context, Pos2, Rect};

/// Where a pointer sample sits within a stroke gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer event in surface-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pos: Pos2,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self {
            pos: Pos2::new(x, y),
            phase,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Down)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Move)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Up)
    }
}

/// Converts egui's primary-button pointer state into `PointerSample`s.
///
/// Positions are translated so the canvas origin is (0,0) and scaled from
/// points to physical pixels, which is the coordinate space of the backing
/// image.
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    last_pointer_pos: Option<Pos2>,
    pressed_in_canvas: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            last_pointer_pos: None,
            pressed_in_canvas: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = rect;
        self.pixels_per_point = pixels_per_point;
    }

    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        let local = pos - self.canvas_rect.min;
        Pos2::new(
            local.x * self.pixels_per_point,
            local.y * self.pixels_per_point,
        )
    }

    /// Process raw egui input and generate the samples for this frame
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerSample> {
        ctx.input(|input| {
            self.translate(
                input.pointer.interact_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_down(),
                input.pointer.primary_released(),
            )
        })
    }

    fn translate(
        &mut self,
        pos: Option<Pos2>,
        pressed: bool,
        down: bool,
        released: bool,
    ) -> Vec<PointerSample> {
        let mut samples = Vec::new();
        let Some(pos) = pos else {
            return samples;
        };

        if pressed && self.canvas_rect.contains(pos) {
            self.pressed_in_canvas = true;
            self.last_pointer_pos = Some(pos);
            let local = self.to_canvas(pos);
            samples.push(PointerSample::down(local.x, local.y));
        } else if down && self.pressed_in_canvas && self.last_pointer_pos != Some(pos) {
            self.last_pointer_pos = Some(pos);
            let local = self.to_canvas(pos);
            samples.push(PointerSample::moved(local.x, local.y));
        }

        if released && self.pressed_in_canvas {
            self.pressed_in_canvas = false;
            self.last_pointer_pos = None;
            let local = self.to_canvas(pos);
            samples.push(PointerSample::up(local.x, local.y));
        }

        samples
    }
}
