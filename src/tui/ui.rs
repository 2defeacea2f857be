use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::select::match_segments;
use crate::tui::app::App;
use crate::tui::colors;

/// Longest result window drawn before the panel scrolls
const MAX_PANEL_ROWS: usize = 12;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(4),    // Dropdown panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    app.input_area = chunks[0];
    draw_input(frame, app, chunks[0]);

    if app.select.is_open() {
        draw_panel(frame, app, chunks[1]);
    } else {
        app.panel_area = Rect::default();
        app.rows_area = Rect::default();
    }

    draw_status_bar(frame, app, chunks[2]);

    // Cursor in the query field. Account for border (1) + space (1) +
    // magnifier icon (approx 2 display cols) + space (1).
    let prefix = &app.select.raw_query()[..app.cursor_pos];
    let cursor_x = chunks[0].x + 1 + 4 + prefix.width() as u16;
    let cursor_y = chunks[0].y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let accent = app.theme.accent();

    let title = if app.select.selection().is_some() {
        " Select (Ctrl+U to clear) "
    } else {
        " Select "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title);

    let query = app.select.raw_query();
    let line = if query.is_empty() {
        Line::from(vec![
            Span::raw(" \u{1F50D} "),
            Span::styled(
                app.select.config().placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(" \u{1F50D} "),
            Span::styled(query.to_string(), Style::default().fg(Color::White)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let total = app.select.filtered_len();
    let rows_height = total.clamp(1, MAX_PANEL_ROWS) as u16;
    // Borders (2) plus the count header line
    let height = (rows_height + 3).min(area.height);

    let panel = Rect::new(area.x, area.y, area.width, height);
    app.panel_area = panel;

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent()));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if inner.height == 0 {
        return;
    }

    draw_panel_header(frame, app, Rect::new(inner.x, inner.y, inner.width, 1));

    let rows_area = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1),
    );
    app.rows_area = rows_area;
    app.list.visible_rows = rows_area.height as usize;

    if total == 0 {
        let text = if app.select.is_loading() {
            ""
        } else if app.select.debounced_query().is_empty() {
            "No data"
        } else {
            "No matches found"
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            rows_area,
        );
        return;
    }

    let start = app.list.scroll_offset;
    let end = (start + app.list.visible_rows).min(total);

    for (visual, view_idx) in (start..end).enumerate() {
        let Some(record) = app.select.result_at(view_idx) else {
            break;
        };

        let is_highlighted = app.list.highlighted == Some(view_idx);
        let bg = if is_highlighted {
            Color::Rgb(40, 40, 60)
        } else {
            Color::Reset
        };

        let query = app.select.debounced_query();
        let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];

        for segment in match_segments(&record.name, query) {
            let style = if segment.is_match {
                colors::match_style()
            } else {
                Style::default().fg(Color::White).bg(bg)
            };
            spans.push(Span::styled(segment.text, style));
        }

        spans.push(Span::styled("  ", Style::default().bg(bg)));
        for segment in match_segments(&record.datasource, query) {
            let style = if segment.is_match {
                colors::match_style()
            } else {
                Style::default()
                    .fg(colors::color_for_tag(&record.datasource))
                    .bg(bg)
            };
            spans.push(Span::styled(segment.text, style));
        }

        let pid_prefix: String = record.pid.chars().take(8).collect();
        spans.push(Span::styled(
            format!("  {}\u{2026}", pid_prefix),
            Style::default().fg(Color::DarkGray).bg(bg),
        ));

        let row_area = Rect::new(rows_area.x, rows_area.y + visual as u16, rows_area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_panel_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.select.is_loading() {
        " Loading data...".to_string()
    } else if app.select.debounced_query().is_empty() {
        format!(
            " Showing first {} of {} records",
            app.select.filtered_len(),
            app.select.dataset_len()
        )
    } else {
        let cap = app.select.config().result_cap;
        let shown = app.select.filtered_len();
        if shown >= cap {
            format!(" Found {}+ matches (first {} shown)", cap, cap)
        } else {
            format!(" Found {} matches", shown)
        }
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.select.is_loading() {
        " \u{23F3} Loading...".to_string()
    } else {
        format!(
            " {} shown | {} total | {}",
            app.select.filtered_len(),
            app.select.dataset_len(),
            app.status_message
        )
    };

    let right_text = " Enter:Select  \u{2191}\u{2193}:Navigate  Ctrl+U:Clear  Esc:Close  Ctrl+Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        left_text
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 95, 135)));

    frame.render_widget(status, area);
}
