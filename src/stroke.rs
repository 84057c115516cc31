use egui::Pos2;
use log::debug;

use crate::input::{PointerPhase, PointerSample};

/// A single drawing instruction in an in-progress stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    /// Quadratic bezier from the previous point, bending towards `ctrl`
    QuadTo { ctrl: Pos2, end: Pos2 },
}

/// The curve commands of the stroke currently under the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    commands: Vec<PathCommand>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Number of committed curve segments
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::QuadTo { .. }))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn move_to(&mut self, pos: Pos2) {
        self.commands.push(PathCommand::MoveTo(pos));
    }

    pub fn quad_to(&mut self, ctrl: Pos2, end: Pos2) {
        self.commands.push(PathCommand::QuadTo { ctrl, end });
    }

    /// Builds the rasterizer path, or `None` when there is nothing to stroke
    pub fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::QuadTo { ctrl, end } => builder.quad_to(ctrl.x, ctrl.y, end.x, end.y),
            }
        }
        builder.finish()
    }
}

/// Whether a stroke is being drawn right now
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// `anchor` is the last accepted sample, the control point of the next segment
    Active { anchor: Pos2 },
}

/// What a pointer sample did to the stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeUpdate {
    /// A new stroke began; nothing to draw yet
    Started,
    /// A segment was appended; the path must be drawn into the cache
    Committed,
    /// The sample was within tolerance of the anchor and was dropped
    Filtered,
    Ended,
    /// Move or Up without an active stroke
    Ignored,
}

/// Turns pointer samples into a smoothed quadratic path.
///
/// Samples closer than `tolerance` to the anchor on both axes are discarded, so
/// jitter never produces a segment. Each accepted sample adds one quadratic
/// curve that bends towards the previous sample and ends halfway to the new
/// one.
#[derive(Debug, Clone)]
pub struct StrokeAccumulator {
    path: StrokePath,
    state: StrokeState,
    tolerance: f32,
}

impl StrokeAccumulator {
    pub fn new(tolerance: f32) -> Self {
        Self {
            path: StrokePath::new(),
            state: StrokeState::Idle,
            tolerance: tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// Point the next move is measured against
    pub fn current_point(&self) -> Option<Pos2> {
        match self.state {
            StrokeState::Active { anchor } => Some(anchor),
            StrokeState::Idle => None,
        }
    }

    /// Control point of the next segment; always equal to `current_point`
    pub fn last_committed_point(&self) -> Option<Pos2> {
        self.current_point()
    }

    pub fn handle(&mut self, sample: PointerSample) -> StrokeUpdate {
        match sample.phase {
            PointerPhase::Down => self.touch_start(sample.pos),
            PointerPhase::Move => self.touch_move(sample.pos),
            PointerPhase::Up => self.touch_up(),
        }
    }

    fn touch_start(&mut self, pos: Pos2) -> StrokeUpdate {
        self.path.reset();
        self.path.move_to(pos);
        self.state = StrokeState::Active { anchor: pos };
        debug!("Stroke started at ({}, {})", pos.x, pos.y);
        StrokeUpdate::Started
    }

    fn touch_move(&mut self, pos: Pos2) -> StrokeUpdate {
        let StrokeState::Active { anchor } = self.state else {
            return StrokeUpdate::Ignored;
        };

        let dx = (pos.x - anchor.x).abs();
        let dy = (pos.y - anchor.y).abs();
        if dx < self.tolerance && dy < self.tolerance {
            return StrokeUpdate::Filtered;
        }

        let end = Pos2::new((pos.x + anchor.x) / 2.0, (pos.y + anchor.y) / 2.0);
        self.path.quad_to(anchor, end);
        self.state = StrokeState::Active { anchor: pos };
        debug!("Segment committed towards ({}, {})", end.x, end.y);
        StrokeUpdate::Committed
    }

    fn touch_up(&mut self) -> StrokeUpdate {
        if !self.is_active() {
            return StrokeUpdate::Ignored;
        }
        debug!("Stroke ended after {} segments", self.path.segment_count());
        self.path.reset();
        self.state = StrokeState::Idle;
        StrokeUpdate::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_skia_path_needs_a_segment() {
        let mut path = StrokePath::new();
        assert!(path.to_skia_path().is_none());

        path.move_to(pos2(1.0, 1.0));
        assert!(path.to_skia_path().is_none());

        path.quad_to(pos2(1.0, 1.0), pos2(5.0, 5.0));
        let skia = path.to_skia_path().unwrap();
        assert_eq!(skia.len(), 2);
    }

    #[test]
    fn test_negative_tolerance_is_clamped() {
        let accumulator = StrokeAccumulator::new(-3.0);
        assert_eq!(accumulator.tolerance(), 0.0);
    }

    #[test]
    fn test_down_at_origin_is_active() {
        let mut accumulator = StrokeAccumulator::new(4.0);
        accumulator.handle(PointerSample::down(0.0, 0.0));
        assert!(accumulator.is_active());
        assert_eq!(
            accumulator.handle(PointerSample::moved(0.0, 4.0)),
            StrokeUpdate::Committed
        );
    }

    #[test]
    fn test_segment_count() {
        let mut path = StrokePath::new();
        path.move_to(pos2(0.0, 0.0));
        path.quad_to(pos2(0.0, 0.0), pos2(1.0, 1.0));
        path.quad_to(pos2(2.0, 2.0), pos2(3.0, 3.0));
        assert_eq!(path.len(), 3);
        assert_eq!(path.segment_count(), 2);
    }
}
