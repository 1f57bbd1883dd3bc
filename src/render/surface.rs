//! The drawing capability the renderer paints through.

use bevy::color::Srgba;

use crate::resources::SurfaceSize;

/// A 2D drawing target with mutable pixel dimensions.
///
/// Coordinates are in pixels with the origin at the top-left corner and y
/// growing downwards. Shapes may extend past the edges; implementations clip.
pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;

    /// Resize the surface. Contents after a resize are unspecified until the
    /// next [`DrawSurface::clear`].
    fn set_size(&mut self, size: SurfaceSize);

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    fn fill_disk(&mut self, center: [f32; 2], radius: f32, color: Srgba);

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Srgba);
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Disk {
        center: [f32; 2],
        radius: f32,
        color: Srgba,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        width: f32,
        color: Srgba,
    },
}

/// Surface that records commands instead of rasterizing them.
///
/// Clearing drops everything recorded so far, so after a tick the list
/// holds exactly that frame.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl DisplayList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears seen since creation (one per painted frame).
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn disks(&self) -> impl Iterator<Item = (&[f32; 2], f32)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Disk { center, radius, .. } => Some((center, *radius)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&[f32; 2], &[f32; 2], &Srgba)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { from, to, color, .. } => Some((from, to, color)),
            _ => None,
        })
    }
}

impl DrawSurface for DisplayList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_disk(&mut self, center: [f32; 2], radius: f32, color: Srgba) {
        self.commands.push(DrawCommand::Disk { center, radius, color });
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Srgba) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }
}
