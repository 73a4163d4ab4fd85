use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::matcher::{RowMatcher, matcher_label};
use crate::picker::{
    EMPTY_LABEL, ListView, SEARCH_PLACEHOLDER, SeasonSwitcher, TRIGGER_TITLE, TriggerView,
};
use crate::route::Router;
use crate::state::AppState;

const TRIGGER_WIDTH: u16 = 34;
const POPOVER_WIDTH: u16 = 34;

pub fn draw(
    frame: &mut Frame,
    switcher: &SeasonSwitcher,
    router: &Router,
    state: &AppState,
    matcher: &dyn RowMatcher,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(router, state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(chunks[1]);

    let trigger_area = Rect {
        width: body[0].width.min(TRIGGER_WIDTH),
        ..body[0]
    };
    let trigger = switcher.trigger_view();
    render_trigger(frame, trigger_area, &trigger);

    let detail = Paragraph::new(detail_text(switcher, router))
        .block(Block::default().title("Season").borders(Borders::ALL));
    frame.render_widget(detail, body[1]);

    let console = Paragraph::new(state.recent_logs(3).join("\n"))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(trigger.expanded))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if trigger.expanded {
        let below = Rect {
            x: trigger_area.x,
            y: trigger_area.y + trigger_area.height,
            width: frame.size().width.saturating_sub(trigger_area.x).min(POPOVER_WIDTH),
            height: frame
                .size()
                .height
                .saturating_sub(trigger_area.y + trigger_area.height),
        };
        render_popover(frame, below, &switcher.list_view(matcher));
    }

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(router: &Router, state: &AppState) -> String {
    format!(
        "SEASONS | Route: {} | Match: {}",
        router.current(),
        matcher_label(state.matcher)
    )
}

fn footer_text(open: bool) -> &'static str {
    if open {
        "Type to search | ↑/↓ Move | Enter Select | Esc Close | Ctrl/Cmd+K Toggle"
    } else {
        "Ctrl/Cmd+K Seasons | Enter/Space Open | r Remount | ? Help | q Quit"
    }
}

pub fn render_trigger(frame: &mut Frame, area: Rect, trigger: &TriggerView) {
    let border = if trigger.expanded {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let label_style = if trigger.placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(TRIGGER_TITLE)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let line = Line::from(vec![
        avatar_span(&trigger.avatar, false),
        Span::raw(" "),
        Span::styled(trigger.label.clone(), label_style),
    ]);
    frame.render_widget(Paragraph::new(line), cols[0]);
    let caret = Paragraph::new("⇅").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(caret, cols[1]);
}

/// Rows plus search box and borders, at least 5.
fn popover_height(lines: usize) -> u16 {
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(5)
}

pub fn render_popover(frame: &mut Frame, area: Rect, list: &ListView) {
    if area.width < 4 || area.height < 4 {
        return;
    }
    let popup = Rect {
        height: area.height.min(popover_height(list_lines(list).len())),
        ..area
    };
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let search = if list.query.is_empty() {
        Paragraph::new(format!("⌕ {SEARCH_PLACEHOLDER}"))
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("⌕ {}", list.query))
    }
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(search, sections[0]);

    if list.is_empty() {
        let empty = Paragraph::new(EMPTY_LABEL)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return;
    }

    let (lines, highlighted_line) = list_lines_with_cursor(list);
    let visible = sections[1].height as usize;
    let (start, _) = visible_range(highlighted_line, lines.len(), visible);
    let paragraph = Paragraph::new(lines).scroll((start as u16, 0));
    frame.render_widget(paragraph, sections[1]);
}

fn list_lines(list: &ListView) -> Vec<Line<'static>> {
    list_lines_with_cursor(list).0
}

fn list_lines_with_cursor(list: &ListView) -> (Vec<Line<'static>>, usize) {
    let heading_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let mut cursor = 0usize;

    for group in &list.groups {
        lines.push(Line::from(Span::styled(group.heading.clone(), heading_style)));
        for row in &group.rows {
            if row.highlighted {
                cursor = lines.len();
            }
            let row_style = if row.highlighted {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let check = if row.checked { "✓" } else { " " };
            lines.push(
                Line::from(vec![
                    Span::raw(" "),
                    avatar_span(&row.avatar, true),
                    Span::raw(" "),
                    Span::raw(row.label.clone()),
                    Span::raw(" "),
                    Span::styled(check, Style::default().fg(Color::Green)),
                ])
                .style(row_style),
            );
        }
    }
    (lines, cursor)
}

// Icons are not drawable in a terminal; the avatar is always its fallback text.
fn avatar_span(text: &str, muted: bool) -> Span<'static> {
    let fg = if muted { Color::Gray } else { Color::Yellow };
    Span::styled(format!("[{text}]"), Style::default().fg(fg))
}

fn detail_text(switcher: &SeasonSwitcher, router: &Router) -> String {
    let mut lines = Vec::new();
    match switcher.selected() {
        Some(season) => {
            lines.push(format!("Name: {}", season.label));
            lines.push(format!("Slug: {}", season.value));
            let icon = if season.icon.is_empty() {
                "-".to_string()
            } else {
                season.icon.clone()
            };
            lines.push(format!("Icon: {icon}"));
        }
        None => lines.push("No season selected".to_string()),
    }
    lines.push(format!(
        "Catalog: {} seasons in {} groups",
        switcher.catalog().len(),
        switcher.catalog().groups().len()
    ));
    lines.push(format!("History: {} entries", router.history().len()));
    lines.join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Season Switcher - Help",
        "",
        "Global:",
        "  Ctrl/Cmd+K   Toggle season list",
        "  Enter/Space  Open season list",
        "  r            Remount from current route",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Season list:",
        "  type         Filter seasons",
        "  ↑/↓          Move",
        "  Enter        Select",
        "  Esc          Close",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
