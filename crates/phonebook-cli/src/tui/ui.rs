//! UI rendering

use phonebook_core::{KeyValueStorage, Notification};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, Focus};

/// Main UI rendering function
pub fn draw<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_editor(frame, app, chunks[1]);
    draw_filter(frame, app, chunks[2]);
    draw_contacts(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn section_block(title: &str, active: bool) -> Block<'_> {
    let border_style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Title line with the randomize hint
fn draw_header<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let randomize = if app.is_loading {
        Span::styled("Fetching sample contacts…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("[Ctrl-R] Randomise Data", Style::default().fg(Color::Cyan))
    };

    let line = Line::from(vec![
        Span::styled("Phonebook", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        randomize,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// "Add Contact" section: name and number inputs
fn draw_editor<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let active = matches!(app.focus, Focus::Name | Focus::Number);
    let block = section_block("Add Contact", active);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = |focus: Focus| {
        if app.focus == focus {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Name:   ", label_style(Focus::Name)),
            Span::raw(app.name_input.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Number: ", label_style(Focus::Number)),
            Span::raw(app.number_input.as_str()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let cursor = match app.focus {
        Focus::Name => Some((app.name_input.chars().count(), 0)),
        Focus::Number => Some((app.number_input.chars().count(), 1)),
        _ => None,
    };
    if let Some((col, row)) = cursor {
        frame.set_cursor_position((inner.x + 8 + col as u16, inner.y + row));
    }
}

/// "Filter by Name" section
fn draw_filter<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let active = app.focus == Focus::Filter;
    let block = section_block("Filter by Name", active);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filter = app.phonebook.filter();
    let text = if filter.is_empty() && !active {
        Line::from(Span::styled(
            "Press / to filter",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(filter)
    };
    frame.render_widget(Paragraph::new(text), inner);

    if active {
        frame.set_cursor_position((inner.x + filter.chars().count() as u16, inner.y));
    }
}

/// "Contacts List" section
fn draw_contacts<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let active = app.focus == Focus::List;
    let contacts = app.visible_contacts();
    let total = app.phonebook.store().len();

    let title = if contacts.len() == total {
        format!("Contacts List ({})", total)
    } else {
        format!("Contacts List ({}/{})", contacts.len(), total)
    };

    let items: Vec<ListItem> = if contacts.is_empty() {
        let empty = if total == 0 {
            "No contacts yet."
        } else {
            "No contacts match the filter."
        };
        vec![ListItem::new(Span::styled(
            empty,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        contacts
            .iter()
            .map(|contact| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}: ", contact.name)),
                    Span::styled(contact.number.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect()
    };

    let highlight_style = if active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(section_block(&title, active))
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    if !contacts.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Latest notification or key hints
fn draw_status_bar<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = match &app.status {
        Some(notification) => {
            let (mark, color) = match notification {
                Notification::Success(_) => ("✓", Color::Green),
                Notification::Failure(_) => ("✗", Color::Red),
            };
            let mut spans = vec![Span::styled(
                format!("{} {}", mark, notification.message()),
                Style::default().fg(color),
            )];
            if app.status_extra > 0 {
                spans.push(Span::styled(
                    format!("  (+{} more)", app.status_extra),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Tab: next section  Enter: submit  d: delete  Esc: reset filter  ?: help  Ctrl-C: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Keyboard help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let width = 52.min(area.width);
    let height = 14.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let lines = vec![
        Line::from("Tab / Shift-Tab   Next / previous section"),
        Line::from(""),
        Line::from("Add Contact"),
        Line::from("  Enter           Next field / submit"),
        Line::from("  Esc             Go to list"),
        Line::from("Filter by Name"),
        Line::from("  Esc             Reset filter"),
        Line::from("Contacts List"),
        Line::from("  j/k ↑/↓         Move selection"),
        Line::from("  d               Delete contact"),
        Line::from("  a  /  q         Add / filter / quit"),
        Line::from("Ctrl-R            Randomise data"),
    ];

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Help ").borders(Borders::ALL)),
        popup_area,
    );
}
