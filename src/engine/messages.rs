use serde::Serialize;

use crate::domain::{DurationDescription, NormalizedAmount, Rect};

/// A pointer-move as the engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerMove<E> {
    pub x: f64,
    pub y: f64,
    /// Composed event path, innermost element first
    pub path: Vec<E>,
}

impl<E> PointerMove<E> {
    pub fn new(x: f64, y: f64, path: Vec<E>) -> Self {
        Self { x, y, path }
    }
}

/// What the host has to do after handing the engine a pointer-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Hover is switched off; nothing happened
    Ignored,
    /// Still inside the locked price; tooltip position refreshed
    Tracking,
    /// Schedule exactly one `on_frame` call for the next display refresh
    FrameRequested,
    /// A frame is already pending; it will use this event instead
    Coalesced,
}

/// The external tooltip/overlay collaborator.
pub trait Renderer {
    fn show(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
        rect: Rect,
    );

    fn update_position(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
    );

    fn hide(&mut self);
}

/// Renderer output captured as data (CLI output, tests).
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum RenderCommand {
    Show {
        x: f64,
        y: f64,
        description: DurationDescription,
        price: NormalizedAmount,
        rect: Rect,
    },
    UpdatePosition {
        x: f64,
        y: f64,
        description: DurationDescription,
        price: NormalizedAmount,
    },
    Hide,
}

#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderCommand> {
        self.commands.last()
    }

    pub fn shows(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Show { .. }))
            .count()
    }

    pub fn hides(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Hide))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn show(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
        rect: Rect,
    ) {
        self.commands.push(RenderCommand::Show {
            x,
            y,
            description: description.clone(),
            price,
            rect,
        });
    }

    fn update_position(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
    ) {
        self.commands.push(RenderCommand::UpdatePosition {
            x,
            y,
            description: description.clone(),
            price,
        });
    }

    fn hide(&mut self) {
        self.commands.push(RenderCommand::Hide);
    }
}
