//! Layout and drawing: title, board, falling pair, next preview, sidebar, popups, overlays.

use crate::board::{Board, EMPTY, ErasedCell};
use crate::game::{GameEvent, Phase, Snapshot};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// Each board cell is two terminal columns wide so cells look square.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const CELL_SYMBOL: &str = "█";

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_HEIGHT: u16 = 23;

/// Duration of the erase fade (TachyonFX).
const ERASE_FADE_MS: u32 = 250;
const POPUP_TTL_MS: u32 = 1200;
/// A popup rises one row per this many ms.
const POPUP_RISE_MS: u32 = 400;
const BANNER_TTL_MS: u32 = 2000;
const TITLE_SLIDE_MS: u32 = 500;

/// Playfield size in terminal cells, border included.
fn playfield_outer_size(board: &Board) -> (u16, u16) {
    let side = |cells: usize, scale: u16| {
        u16::try_from(cells)
            .unwrap_or(u16::MAX)
            .saturating_mul(scale)
            .saturating_add(2)
    };
    (side(board.cols(), CELL_WIDTH), side(board.rows(), CELL_HEIGHT))
}

/// Floating `+score` label anchored on the board in grid coordinates.
#[derive(Debug, Clone)]
struct Popup {
    x: i32,
    y: i32,
    label: String,
    color: Color,
    age_ms: u32,
}

/// Presentation state fed by [`GameEvent`]s: score popups, the all-clear banner and the erase fade.
#[derive(Default)]
pub struct Overlay {
    popups: Vec<Popup>,
    banner: Option<(String, u32)>,
    /// Cells erased by the last cycle, drawn as fading ghosts while the effect runs.
    fading: Vec<ErasedCell>,
    erase_effect: Option<Effect>,
    erase_process_time: Option<Instant>,
    title_start: Option<Instant>,
}

impl Overlay {
    /// Record a simulation event. With `animate` off erased cells vanish without a fade.
    pub fn push_event(&mut self, event: &GameEvent, theme: &Theme, animate: bool) {
        match event {
            GameEvent::Erased {
                count,
                groups,
                chain,
                score,
                cells,
            } => {
                debug_assert_eq!(*count, cells.len());
                let (x, y) = centroid(cells);
                let color = cells
                    .first()
                    .map_or(theme.title, |c| theme.cell_color(c.color));
                let mut label = format!("+{score}");
                if *groups > 1 {
                    label.push_str(&format!(" x{groups}"));
                }
                if *chain > 1 {
                    label.push_str(&format!(" {chain} chain"));
                }
                self.popups.push(Popup {
                    x,
                    y,
                    label,
                    color,
                    age_ms: 0,
                });
                if animate {
                    self.fading.clone_from(cells);
                    self.erase_effect = None;
                    self.erase_process_time = None;
                }
            }
            GameEvent::AllClear { bonus } => {
                self.banner = Some((format!(" ALL CLEAR +{bonus} "), 0));
            }
            GameEvent::Spawned | GameEvent::Landed | GameEvent::GameOver => {}
        }
    }

    /// Age popups and the banner; drop expired ones.
    pub fn tick(&mut self, delta_ms: u32) {
        for popup in &mut self.popups {
            popup.age_ms = popup.age_ms.saturating_add(delta_ms);
        }
        self.popups.retain(|p| p.age_ms < POPUP_TTL_MS);
        if let Some((_, age)) = &mut self.banner {
            *age = age.saturating_add(delta_ms);
            if *age >= BANNER_TTL_MS {
                self.banner = None;
            }
        }
    }

    /// Drop the erase ghosts once the fade has run its course.
    pub fn finish_fade(&mut self) {
        if self.erase_effect.as_ref().is_some_and(Effect::done) {
            self.fading.clear();
            self.erase_effect = None;
            self.erase_process_time = None;
        }
    }

    pub fn reset(&mut self) {
        let title_start = self.title_start;
        *self = Self {
            title_start,
            ..Self::default()
        };
    }

    #[cfg(test)]
    fn popup_labels(&self) -> Vec<&str> {
        self.popups.iter().map(|p| p.label.as_str()).collect()
    }
}

fn centroid(cells: &[ErasedCell]) -> (i32, i32) {
    if cells.is_empty() {
        return (0, 0);
    }
    let n = cells.len() as i32;
    let (sx, sy) = cells
        .iter()
        .fold((0, 0), |(ax, ay), c| (ax + c.x, ay + c.y));
    (sx / n, sy / n)
}

/// Draw the current phase. Pause is a presentation flag and only adds an overlay.
pub fn draw(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
    overlay: &mut Overlay,
    paused: bool,
    now: Instant,
) {
    let area = frame.area();
    match snapshot.phase {
        Phase::Title => {
            let start = *overlay.title_start.get_or_insert(now);
            draw_title(frame, theme, area, now, start);
        }
        Phase::GameOver => {
            draw_game(frame, snapshot, theme, overlay, area);
            draw_game_over(frame, snapshot, theme, area);
        }
        _ => {
            draw_game(frame, snapshot, theme, overlay, area);
            if !overlay.fading.is_empty() {
                apply_erase_effect(frame, snapshot, theme, overlay, area, now);
            }
            if paused {
                draw_pause_overlay(frame, theme, area);
            }
        }
    }
}

/// Playfield (outer, with border) and sidebar rects, centred in `area`.
fn game_layout(area: Rect, board: &Board) -> (Rect, Rect) {
    let (pw, ph) = playfield_outer_size(board);
    let total_w = pw.saturating_add(SIDEBAR_WIDTH);
    let total_h = ph.max(SIDEBAR_HEIGHT);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_h),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let playfield = Rect {
        height: ph.min(inner[0].height),
        ..inner[0]
    };
    (playfield, inner[1])
}

fn board_rect(playfield: Rect) -> Rect {
    playfield.inner(Margin::new(1, 1))
}

fn border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.div_line).bg(theme.bg)
}

/// Paint one grid cell; off-board or clipped cells are skipped.
fn paint_cell(buf: &mut Buffer, rect: Rect, x: i32, y: i32, color: Option<Color>, theme: &Theme) {
    let (Ok(gx), Ok(gy)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let rx = rect.x + gx * CELL_WIDTH;
    let ry = rect.y + gy * CELL_HEIGHT;
    if ry >= rect.bottom() {
        return;
    }
    for dx in 0..CELL_WIDTH {
        if rx + dx >= rect.right() {
            break;
        }
        let cell = &mut buf[(rx + dx, ry)];
        match color {
            Some(c) => cell
                .set_symbol(CELL_SYMBOL)
                .set_style(Style::default().fg(c).bg(theme.bg)),
            None => cell.set_symbol(" ").set_style(Style::default().bg(theme.bg)),
        };
    }
}

fn draw_game(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
    overlay: &Overlay,
    area: Rect,
) {
    let (playfield, sidebar) = game_layout(area, snapshot.board);
    draw_playfield(frame, snapshot, theme, overlay, playfield);
    draw_sidebar(frame, snapshot, theme, sidebar);
}

fn draw_playfield(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
    overlay: &Overlay,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" puyotui ", theme.title));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for (y, row) in snapshot.board.rows_iter().enumerate() {
        for (x, &tag) in row.iter().enumerate() {
            let (x, y) = (x as i32, y as i32);
            let color = if tag == EMPTY {
                overlay
                    .fading
                    .iter()
                    .find(|c| c.x == x && c.y == y)
                    .map(|c| theme.cell_color(c.color))
            } else {
                Some(theme.cell_color(tag))
            };
            paint_cell(buf, inner, x, y, color, theme);
        }
    }

    // The companion may sit in the hidden row above the board; paint_cell skips it.
    if let Some(piece) = snapshot.piece {
        for (x, y, tag) in piece.cells() {
            paint_cell(buf, inner, x, y, Some(theme.cell_color(tag)), theme);
        }
    }

    for popup in &overlay.popups {
        let rise = (popup.age_ms / POPUP_RISE_MS) as i32;
        let gy = (popup.y - rise).max(0) as u16;
        let ry = inner.y + gy * CELL_HEIGHT;
        if ry >= inner.bottom() {
            continue;
        }
        let width = popup.label.chars().count() as u16;
        let rx = (inner.x + popup.x.max(0) as u16 * CELL_WIDTH)
            .min(inner.right().saturating_sub(width))
            .max(inner.x);
        let style = Style::default().fg(popup.color).bg(theme.bg).bold();
        buf.set_stringn(
            rx,
            ry,
            &popup.label,
            usize::from(inner.right().saturating_sub(rx)),
            style,
        );
    }

    if let Some((label, _)) = &overlay.banner {
        let row = Rect {
            y: inner.y + inner.height / 3,
            height: inner.height.min(1),
            ..inner
        };
        Paragraph::new(Line::from(Span::styled(
            label.as_str(),
            Style::default().fg(theme.bg).bg(theme.title).bold(),
        )))
        .alignment(Alignment::Center)
        .render(row, buf);
    }
}

/// Board buffer positions covered by the erase ghosts.
fn fading_buffer_positions(rect: Rect, cells: &[ErasedCell]) -> HashSet<(u16, u16)> {
    let mut set = HashSet::new();
    for c in cells {
        let (Ok(gx), Ok(gy)) = (u16::try_from(c.x), u16::try_from(c.y)) else {
            continue;
        };
        let x0 = rect.x + gx * CELL_WIDTH;
        let y0 = rect.y + gy * CELL_HEIGHT;
        for bx in x0..(x0 + CELL_WIDTH).min(rect.right()) {
            for by in y0..(y0 + CELL_HEIGHT).min(rect.bottom()) {
                set.insert((bx, by));
            }
        }
    }
    set
}

/// Create or advance the erase fade: ghost cells fade to the background.
fn apply_erase_effect(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
    overlay: &mut Overlay,
    area: Rect,
    now: Instant,
) {
    let (playfield, _) = game_layout(area, snapshot.board);
    let rect = board_rect(playfield);
    let delta = overlay
        .erase_process_time
        .map_or(std::time::Duration::ZERO, |t| now.saturating_duration_since(t));
    let delta_ms = delta.as_millis().min(u128::from(u32::MAX)) as u32;
    overlay.erase_process_time = Some(now);

    if overlay.erase_effect.is_none() {
        let positions = fading_buffer_positions(rect, &overlay.fading);
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            positions.contains(&(pos.x, pos.y))
        }));
        let bg = theme.bg;
        let effect = fx::fade_to(bg, bg, (ERASE_FADE_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(rect);
        overlay.erase_effect = Some(effect);
    }
    if let Some(effect) = overlay.erase_effect.as_mut() {
        frame.render_effect(effect, rect, TfxDuration::from_millis(delta_ms));
    }

    // Cells that fell into a fading position since the erase stay solid.
    let buf = frame.buffer_mut();
    for c in &overlay.fading {
        let tag = snapshot.board.get(c.x, c.y);
        if tag != EMPTY {
            paint_cell(buf, rect, c.x, c.y, Some(theme.cell_color(tag)), theme);
        }
    }
    if let Some(piece) = snapshot.piece {
        for (x, y, tag) in piece.cells() {
            paint_cell(buf, rect, x, y, Some(theme.cell_color(tag)), theme);
        }
    }
}

fn draw_sidebar(frame: &mut Frame, snapshot: &Snapshot<'_>, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let hint_style = Style::default().fg(theme.inactive_fg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next (border + title + pair)
            Constraint::Length(1),
            Constraint::Length(6), // Score, chain, max chain, all clear
            Constraint::Length(1),
            Constraint::Length(4), // Drop gauge
            Constraint::Length(1),
            Constraint::Length(5), // Keys
        ])
        .split(area);

    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2)])
        .split(next_inner);
    Paragraph::new(Line::from(Span::styled("Next", title_style)))
        .render(next_layout[0], frame.buffer_mut());
    draw_next_preview(frame, snapshot, theme, next_layout[1]);

    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], frame.buffer_mut());
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let mut stats = vec![
        stat("Score: ", snapshot.score.to_string()),
        stat("Chain: ", snapshot.chain.to_string()),
        stat("Max chain: ", snapshot.max_chain.to_string()),
    ];
    if snapshot.all_clear {
        stats.push(Line::from(Span::styled(
            "All clear!",
            Style::default().fg(theme.title).bold(),
        )));
    }
    Paragraph::new(stats).render(stats_inner, frame.buffer_mut());

    let drop_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let drop_inner = drop_block.inner(chunks[4]);
    drop_block.render(chunks[4], frame.buffer_mut());
    let drop_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(drop_inner);
    Paragraph::new(Line::from(Span::styled("Drop", title_style)))
        .render(drop_layout[0], frame.buffer_mut());
    let ratio = if snapshot.piece.is_some() {
        snapshot.drop_progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    Gauge::default()
        .ratio(ratio)
        .label("")
        .gauge_style(Style::default().fg(theme.cell_color(2)).bg(theme.bg))
        .render(drop_layout[1], frame.buffer_mut());

    let keys_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let keys_inner = keys_block.inner(chunks[6]);
    keys_block.render(chunks[6], frame.buffer_mut());
    Paragraph::new(vec![
        Line::from(Span::styled("←→ move  ↓ drop", hint_style)),
        Line::from(Span::styled("↑/x  z   rotate", hint_style)),
        Line::from(Span::styled("P pause  Q quit", hint_style)),
    ])
    .render(keys_inner, frame.buffer_mut());
}

/// Next pair stacked the way it spawns: companion on top of the axis.
fn draw_next_preview(frame: &mut Frame, snapshot: &Snapshot<'_>, theme: &Theme, area: Rect) {
    let (axis, companion) = snapshot.next;
    let rect = Rect {
        x: area.x + area.width.saturating_sub(CELL_WIDTH) / 2,
        width: CELL_WIDTH.min(area.width),
        ..area
    };
    let buf = frame.buffer_mut();
    paint_cell(buf, rect, 0, 0, Some(theme.cell_color(companion)), theme);
    paint_cell(buf, rect, 0, 1, Some(theme.cell_color(axis)), theme);
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_title(frame: &mut Frame, theme: &Theme, area: Rect, now: Instant, start: Instant) {
    let popup = centered_popup(area, 40, 14);

    let name: Vec<Span> = "PUYOTUI"
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let tag = (i % theme.cells.len()) as i8 + 1;
            Span::styled(
                format!("{ch} "),
                Style::default().fg(theme.cell_color(tag)).bold(),
            )
        })
        .collect();
    let strip: Vec<Span> = theme
        .cells
        .iter()
        .map(|c| Span::styled("██ ", Style::default().fg(*c)))
        .collect();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.title).bold());
    let text = |t: &'static str| Span::styled(t, Style::default().fg(theme.main_fg));

    let lines = vec![
        Line::from(""),
        Line::from(name),
        Line::from(""),
        Line::from(text("Pop groups of four or more")),
        Line::from(text("same-coloured blobs. Chain them.")),
        Line::from(""),
        Line::from(strip),
        Line::from(""),
        Line::from(vec![key(" ENTER "), text("start   "), key(" Q "), text("quit")]),
        Line::from(""),
        Line::from(Span::styled(
            "←→ move  ↑ x z rotate  ↓ drop",
            Style::default().fg(theme.inactive_fg),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(theme)));

    // Slide in from below, ease-out cubic.
    let elapsed = now.saturating_duration_since(start).as_millis() as f32;
    let t = (elapsed / TITLE_SLIDE_MS as f32).min(1.0);
    let offset = ((1.0 - t).powi(3) * 10.0) as u16;
    let mut anim = popup;
    anim.y = (anim.y + offset).min(area.bottom().saturating_sub(anim.height));

    p.render(anim, frame.buffer_mut());
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered_popup(area, 28, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(Span::styled(
            " P resume    Q quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(theme)))
        .render(popup, frame.buffer_mut());
}

fn draw_game_over(frame: &mut Frame, snapshot: &Snapshot<'_>, theme: &Theme, area: Rect) {
    let popup = centered_popup(area, 30, 9);
    let fg = Style::default().fg(theme.main_fg);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" Score: {} ", snapshot.score), fg)),
        Line::from(Span::styled(
            format!(" Max chain: {} ", snapshot.max_chain),
            fg,
        )),
        Line::from(""),
        Line::from(Span::styled(" ENTER restart    Q quit ", fg)),
    ];
    // Clear what is underneath first.
    for y in popup.top()..popup.bottom() {
        for x in popup.left()..popup.right() {
            frame.buffer_mut()[(x, y)]
                .set_symbol(" ")
                .set_style(Style::default().bg(theme.bg));
        }
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .title(Span::styled(" puyotui ", theme.title)),
        )
        .render(popup, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erased(cells: &[(i32, i32)], chain: usize, score: u32) -> GameEvent {
        GameEvent::Erased {
            count: cells.len(),
            groups: 1,
            chain,
            score,
            cells: cells
                .iter()
                .map(|&(x, y)| ErasedCell { x, y, color: 1 })
                .collect(),
        }
    }

    #[test]
    fn test_centroid() {
        let cells = [
            ErasedCell { x: 0, y: 10, color: 1 },
            ErasedCell { x: 2, y: 10, color: 1 },
            ErasedCell { x: 1, y: 11, color: 1 },
            ErasedCell { x: 1, y: 9, color: 1 },
        ];
        assert_eq!(centroid(&cells), (1, 10));
        assert_eq!(centroid(&[]), (0, 0));
    }

    #[test]
    fn test_popup_labels_show_chain() {
        let theme = Theme::default();
        let mut overlay = Overlay::default();
        overlay.push_event(&erased(&[(0, 11), (1, 11), (2, 11), (3, 11)], 1, 40), &theme, true);
        overlay.push_event(&erased(&[(0, 11), (0, 10), (0, 9), (0, 8)], 2, 43), &theme, true);
        assert_eq!(overlay.popup_labels(), vec!["+40", "+43 2 chain"]);
        assert_eq!(overlay.fading.len(), 4);
        assert_eq!(overlay.fading[0].x, 0);
    }

    #[test]
    fn test_popup_label_counts_groups() {
        let theme = Theme::default();
        let mut overlay = Overlay::default();
        let mut event = erased(&[(0, 11), (1, 11), (2, 11), (3, 11)], 3, 96);
        if let GameEvent::Erased { groups, .. } = &mut event {
            *groups = 2;
        }
        overlay.push_event(&event, &theme, false);
        assert_eq!(overlay.popup_labels(), vec!["+96 x2 3 chain"]);
    }

    #[test]
    fn test_popups_and_banner_expire() {
        let theme = Theme::default();
        let mut overlay = Overlay::default();
        overlay.push_event(&erased(&[(0, 0)], 1, 10), &theme, false);
        overlay.push_event(&GameEvent::AllClear { bonus: 2100 }, &theme, false);
        assert!(overlay.fading.is_empty());
        overlay.tick(POPUP_TTL_MS - 1);
        assert_eq!(overlay.popups.len(), 1);
        overlay.tick(1);
        assert!(overlay.popups.is_empty());
        assert!(overlay.banner.is_some());
        overlay.tick(BANNER_TTL_MS);
        assert!(overlay.banner.is_none());
    }

    #[test]
    fn test_fading_positions_cover_cell_width() {
        let rect = Rect::new(1, 1, 12, 12);
        let cells = [ErasedCell { x: 2, y: 3, color: 1 }];
        let set = fading_buffer_positions(rect, &cells);
        assert_eq!(set.len(), CELL_WIDTH as usize);
        assert!(set.contains(&(5, 4)));
        assert!(set.contains(&(6, 4)));
    }

    #[test]
    fn test_oversized_board_layout_saturates() {
        let board = Board::new(40_000, 12);
        assert_eq!(playfield_outer_size(&board).0, u16::MAX);
        let (playfield, _) = game_layout(Rect::new(0, 0, 80, 30), &board);
        assert!(playfield.width <= 80);
    }

    #[test]
    fn test_layout_fits_board_and_sidebar() {
        let board = Board::new(6, 12);
        let area = Rect::new(0, 0, 80, 30);
        let (playfield, sidebar) = game_layout(area, &board);
        assert_eq!(playfield.width, 6 * CELL_WIDTH + 2);
        assert_eq!(playfield.height, 12 + 2);
        assert_eq!(sidebar.x, playfield.right());
        assert_eq!(board_rect(playfield).width, 12);
    }
}
