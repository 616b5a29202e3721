/// Logical drawing surface shared by every game
use ratatui::style::Color;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Context, Line};

/// Logical surface size in pixels. Origin is top-left, y grows downward.
pub const SURFACE_WIDTH: f64 = 400.0;
pub const SURFACE_HEIGHT: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Orange,
    White,
    Gray,
    DarkGray,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Blue => Color::Blue,
            TerminalColor::Yellow => Color::Yellow,
            TerminalColor::Cyan => Color::Cyan,
            TerminalColor::Magenta => Color::Magenta,
            TerminalColor::Orange => Color::Rgb(255, 165, 0),
            TerminalColor::White => Color::White,
            TerminalColor::Gray => Color::Gray,
            TerminalColor::DarkGray => Color::DarkGray,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled rectangle, `(x, y)` is the top-left corner
    Rect { x: f64, y: f64, w: f64, h: f64, color: TerminalColor },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: TerminalColor },
    /// Text anchored at its top-left corner
    Text { x: f64, y: f64, text: String, color: TerminalColor },
}

/// One frame worth of draw commands.
///
/// Games never touch the terminal; they describe the frame here and the
/// terminal renderer paints it.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCmd>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: TerminalColor) {
        self.commands.push(DrawCmd::Rect { x, y, w, h, color });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: TerminalColor) {
        self.commands.push(DrawCmd::Line { x1, y1, x2, y2, color });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, color: TerminalColor) {
        self.commands.push(DrawCmd::Text { x, y, text: text.into(), color });
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// All text drawn this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rect_count(&self, color: TerminalColor) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Rect { color: c, .. } if *c == color))
            .count()
    }

    /// Centered "GAME OVER" label with the final score
    pub fn game_over_overlay(&mut self, score: u32) {
        self.fill_rect(100.0, 110.0, 200.0, 70.0, TerminalColor::DarkGray);
        self.text(160.0, 125.0, "GAME OVER", TerminalColor::Red);
        self.text(150.0, 145.0, format!("Final score: {score}"), TerminalColor::White);
        self.text(130.0, 160.0, "[R] Restart  [Esc] Menu", TerminalColor::Gray);
    }

    pub fn paused_overlay(&mut self) {
        self.text(175.0, 140.0, "PAUSED", TerminalColor::Yellow);
    }

    /// Paint onto a ratatui canvas whose bounds match the logical surface.
    ///
    /// Canvas y grows upward, so every coordinate is flipped here.
    pub fn paint(&self, ctx: &mut Context<'_>) {
        for cmd in &self.commands {
            match cmd {
                DrawCmd::Rect { x, y, w, h, color } => {
                    let top = SURFACE_HEIGHT - y;
                    let bottom = top - h;
                    let mut row = bottom;
                    while row < top {
                        ctx.draw(&Line::new(*x, row, x + w - 1.0, row, (*color).into()));
                        row += 1.0;
                    }
                }
                DrawCmd::Line { x1, y1, x2, y2, color } => {
                    ctx.draw(&Line::new(
                        *x1,
                        SURFACE_HEIGHT - y1,
                        *x2,
                        SURFACE_HEIGHT - y2,
                        (*color).into(),
                    ));
                }
                DrawCmd::Text { x, y, text, color } => {
                    ctx.print(
                        *x,
                        SURFACE_HEIGHT - y,
                        TextLine::styled(text.clone(), Color::from(*color)),
                    );
                }
            }
        }
    }
}
