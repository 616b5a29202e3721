/// Terminal rendering context that owns the tty for the lifetime of the arcade
use anyhow::{Context, Result};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::DefaultTerminal;

use crate::core::renderer::{Scene, SURFACE_HEIGHT, SURFACE_WIDTH};

/// What the engine wants on screen this frame
pub struct FrameView<'a> {
    pub title: &'a str,
    pub scene: &'a Scene,
    pub hints: &'a str,
}

pub struct TerminalRenderer {
    terminal: DefaultTerminal,
}

impl TerminalRenderer {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn new() -> Self {
        Self { terminal: ratatui::init() }
    }

    /// Clear and redraw the whole surface
    pub fn draw(&mut self, view: FrameView<'_>) -> Result<()> {
        self.terminal
            .draw(|f| {
                let [body, footer] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());
                let surface = fit_surface(body);

                let canvas = Canvas::default()
                    .block(
                        Block::default()
                            .title(format!(" {} ", view.title))
                            .borders(Borders::ALL),
                    )
                    .marker(Marker::HalfBlock)
                    .background_color(Color::Black)
                    .x_bounds([0.0, SURFACE_WIDTH])
                    .y_bounds([0.0, SURFACE_HEIGHT])
                    .paint(|ctx| view.scene.paint(ctx));
                f.render_widget(canvas, surface);

                f.render_widget(
                    Paragraph::new(view.hints)
                        .style(Style::default().fg(Color::Gray))
                        .alignment(Alignment::Center),
                    footer,
                );
            })
            .context("failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Largest centered area keeping the 4:3 surface aspect. Terminal cells are
/// roughly twice as tall as wide, hence 8:3 in cells.
fn fit_surface(area: Rect) -> Rect {
    let inner_h = area.height.saturating_sub(2) as u32;
    let inner_w = area.width.saturating_sub(2) as u32;
    let (w, h) = if inner_w * 3 >= inner_h * 8 {
        (inner_h * 8 / 3, inner_h)
    } else {
        (inner_w, inner_w * 3 / 8)
    };
    let [area] = Layout::horizontal([Constraint::Length(w as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(h as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_is_limited_by_height() {
        let area = fit_surface(Rect::new(0, 0, 200, 32));
        assert_eq!(area.height, 32);
        assert_eq!(area.width, 30 * 8 / 3 + 2);
        assert!(area.x > 0);
    }

    #[test]
    fn tall_terminal_is_limited_by_width() {
        let area = fit_surface(Rect::new(0, 0, 82, 100));
        assert_eq!(area.width, 82);
        assert_eq!(area.height, 80 * 3 / 8 + 2);
    }
}
