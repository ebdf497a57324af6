use serde::Serialize;

use crate::types::Position;

/// Drawing seam implemented by the presentation layer.
pub trait Surface {
    fn fill_cell(&mut self, position: Position, size: u32, color: &str);
    fn fill_circle(&mut self, center_x: f64, center_y: f64, radius: f64, color: &str);
    fn draw_glyph(&mut self, center_x: f64, center_y: f64, glyph: char, color: &str);
}

/// Capability of anything that can put itself on a `Surface`.
/// Contract: drawing never mutates game state.
pub trait Renderable {
    fn draw(&self, surface: &mut dyn Surface, position: Position, color: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillCell {
        x: i32,
        y: i32,
        size: u32,
        color: String,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
    },
    Glyph {
        x: f64,
        y: f64,
        glyph: char,
        color: String,
    },
}

/// Records draw calls so a JS canvas can replay them.
#[derive(Debug, Default, Clone)]
pub struct CommandSurface {
    commands: Vec<DrawCommand>,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for CommandSurface {
    fn fill_cell(&mut self, position: Position, size: u32, color: &str) {
        self.commands.push(DrawCommand::FillCell {
            x: position.x,
            y: position.y,
            size,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center_x: f64, center_y: f64, radius: f64, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            x: center_x,
            y: center_y,
            radius,
            color: color.to_string(),
        });
    }

    fn draw_glyph(&mut self, center_x: f64, center_y: f64, glyph: char, color: &str) {
        self.commands.push(DrawCommand::Glyph {
            x: center_x,
            y: center_y,
            glyph,
            color: color.to_string(),
        });
    }
}
