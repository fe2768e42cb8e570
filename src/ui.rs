//! Layout and drawing: bordered board, key help, sweep flash.

use crate::session::{Canvas, Session};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Duration of the board flash after a sweep removes rows.
const SWEEP_FLASH_MS: u32 = 350;

const HELP: &str = " ←/→ h/l Move   ↑ k Rotate   ↓ j Drop   Q Quit ";

/// Board size in terminal cells (border + grid).
fn board_outer_size(width: usize, height: usize, cell_width: u16) -> (u16, u16) {
    let w = (width as u16).saturating_mul(cell_width).saturating_add(2);
    let h = (height as u16).saturating_add(2);
    (w, h)
}

/// [`Canvas`] over a region of a ratatui buffer. Each grid cell is `cell_width` columns wide and
/// one row tall; anything outside the region is clipped.
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    theme: &'a Theme,
    cell_width: u16,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, theme: &'a Theme, cell_width: u16) -> Self {
        let area = area.intersection(*buf.area());
        Self {
            buf,
            area,
            theme,
            cell_width,
        }
    }

    fn fill(&mut self, x0: u16, x1: u16, y: u16, style: Style) {
        for x in x0..x1 {
            self.buf[(x, y)].set_symbol(" ").set_style(style);
        }
    }
}

impl Canvas for BufferCanvas<'_> {
    fn clear_surface(&mut self) {
        let style = Style::default().bg(self.theme.bg);
        for y in self.area.top()..self.area.bottom() {
            self.fill(self.area.left(), self.area.right(), y, style);
        }
    }

    fn paint_cell(&mut self, x: usize, y: usize, color: u8) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let row = self.area.y.saturating_add(y);
        if row >= self.area.bottom() {
            return;
        }
        let left = self
            .area
            .x
            .saturating_add(x.saturating_mul(self.cell_width));
        let right = left.saturating_add(self.cell_width).min(self.area.right());
        let style = Style::default().bg(self.theme.cell_color(color));
        self.fill(left, right, row, style);
    }
}

/// Flash effect started when a sweep removes rows: the board lights up and fades back.
pub fn sweep_flash(theme: &Theme) -> Effect {
    fx::fade_from(
        theme.flash,
        theme.flash,
        (SWEEP_FLASH_MS, Interpolation::QuadOut),
    )
}

/// Draw the board centred in the frame with the help line under it. Advances and renders
/// `sweep_effect` if one is running.
pub fn draw(
    frame: &mut Frame,
    session: &Session,
    theme: &Theme,
    cell_width: u16,
    sweep_effect: &mut Option<Effect>,
    sweep_effect_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    let field = session.playfield();
    let (bw, bh) = board_outer_size(field.width(), field.height(), cell_width);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
    let board_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bw),
            Constraint::Fill(1),
        ])
        .split(rows[1]);
    let board_area = board_row[1];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border).bg(theme.bg))
        .title(Span::styled(" gridfall ", Style::default().fg(theme.title)));
    let inner = block.inner(board_area);
    block.render(board_area, frame.buffer_mut());

    session.render(&mut BufferCanvas::new(
        frame.buffer_mut(),
        inner,
        theme,
        cell_width,
    ));

    Paragraph::new(Line::from(Span::styled(
        HELP,
        Style::default().fg(theme.text),
    )))
    .alignment(Alignment::Center)
    .render(rows[2], frame.buffer_mut());

    if let Some(effect) = sweep_effect {
        let delta = sweep_effect_process_time
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(std::time::Duration::ZERO);
        let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
        *sweep_effect_process_time = Some(now);
        frame.render_effect(effect, inner, TfxDuration::from_millis(delta_ms));
    }
}
