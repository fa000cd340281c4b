//! Terminal frame layout: header, bordered map panel, footer
//!
//! Pure presentation. The map panel's inner dimensions are handed to the
//! engine on every draw; the engine's cache notices size changes itself.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::app::{App, FeedStatus};
use crate::render::grid::{Grid, Paint};

const KEY_HELP: &str = "Pan: arrows | Zoom: +/- | Reset: r | Quit: q";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header_area, map_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header_area, app);
    draw_map(frame, map_area, app);
    draw_footer(frame, footer_area, app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.feed_status {
        FeedStatus::Connecting => Span::styled(" CONNECTING ", Style::new().fg(Color::Yellow)),
        FeedStatus::Live => Span::styled(" LIVE ", Style::new().fg(Color::Green)),
        FeedStatus::Lost(_) => Span::styled(" FEED LOST ", Style::new().fg(Color::Red).bold()),
    };

    let line = Line::from(vec![
        Span::raw(" skywatch "),
        Span::raw(format!("| {} UTC ", chrono::Utc::now().format("%H:%M:%S"))),
        Span::raw(format!(
            "| {} aircraft, {} with fix, {} active ",
            app.table.len(),
            app.table.fix_count(),
            app.table.active_count()
        )),
        Span::raw("|"),
        status,
    ]);
    let header = Paragraph::new(line).style(Style::new().fg(Color::White).bg(Color::Indexed(63)));
    frame.render_widget(header, area);
}

fn draw_map(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(Color::Indexed(63)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let grid = app
        .engine
        .render(&app.table, inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(grid_lines(&grid)), inner);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let left = format!(" skywatch | Zoom: {:.1}x", app.engine.zoom_level());
    let pad = (area.width as usize)
        .saturating_sub(left.len() + KEY_HELP.len() + 1);
    let line = Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(pad)),
        Span::styled(KEY_HELP, Style::new().fg(Color::Indexed(240))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn paint_style(paint: Paint) -> Style {
    match paint {
        Paint::Blank => Style::new(),
        Paint::Map => Style::new().fg(Color::Indexed(255)),
        Paint::Airport => Style::new().fg(Color::Indexed(220)),
        Paint::Aircraft => Style::new().fg(Color::Indexed(81)),
        Paint::Label => Style::new().fg(Color::Indexed(86)),
    }
}

/// Convert the cell grid into styled lines, merging runs of equally
/// painted cells into single spans.
fn grid_lines(grid: &Grid) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(grid.height());
    for row in 0..grid.height() {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_paint = Paint::Blank;
        for cell in grid.row(row) {
            if cell.paint != run_paint && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    paint_style(run_paint),
                ));
            }
            run_paint = cell.paint;
            run.push(cell.glyph);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, paint_style(run_paint)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::grid::Cell;

    #[test]
    fn test_grid_lines_merge_runs() {
        let mut grid = Grid::blank(6, 1);
        for col in 2..4 {
            grid.set(
                col,
                0,
                Cell {
                    glyph: '.',
                    paint: Paint::Map,
                },
            );
        }
        let lines = grid_lines(&grid);
        assert_eq!(lines.len(), 1);
        // blank run, map run, blank run
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[1].content, "..");
    }

    #[test]
    fn test_grid_lines_preserve_width() {
        let grid = Grid::blank(10, 4);
        let lines = grid_lines(&grid);
        assert_eq!(lines.len(), 4);
        for line in lines {
            let width: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
            assert_eq!(width, 10);
        }
    }
}
