// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Session;
use metapick_app::{Column, FilterState, WizardStep};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table};

const SELECTED_GLYPH: &str = "●";
const UNSELECTED_GLYPH: &str = "○";

pub(crate) fn render(frame: &mut ratatui::Frame<'_>, session: &Session) {
    match session.state.step {
        WizardStep::PickType => render_pick_type(frame, session),
        WizardStep::BrowseRecords => render_browse(frame, session),
    }
}

fn render_pick_type(frame: &mut ratatui::Frame<'_>, session: &Session) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(step_header(WizardStep::PickType), layout[0]);

    let range = session.types.visible_range();
    let cursor = session.types.cursor();
    let items = session.types.items()[range.clone()]
        .iter()
        .zip(range)
        .map(|(name, index)| {
            let marker = if *name == session.metadata_type {
                " (loaded)"
            } else {
                ""
            };
            let mut style = Style::default();
            if index == cursor {
                style = style
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD);
            }
            ListItem::new(format!("{name}{marker}")).style(style)
        })
        .collect::<Vec<_>>();
    let list = List::new(items).block(
        Block::default()
            .title("Choose metadata type")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, layout[1]);

    let status = session
        .state
        .status_line
        .clone()
        .or_else(|| session.fetch_error.clone())
        .or_else(|| type_hint_text(session.types.highlighted(), &session.metadata_type))
        .unwrap_or_default();
    render_status(frame, layout[2], &status);
    render_help(frame, layout[3], WizardStep::PickType);
}

fn render_browse(frame: &mut ratatui::Frame<'_>, session: &Session) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(step_header(WizardStep::BrowseRecords), layout[0]);

    let banner = Paragraph::new(filter_banner_text(&session.state.filter))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(banner, layout[1]);

    let input = Paragraph::new(format!("Input: {}", session.search.value()));
    frame.render_widget(input, layout[2]);

    render_table(frame, layout[3], session);

    let status = session
        .state
        .status_line
        .clone()
        .or_else(|| session.fetch_error.clone())
        .unwrap_or_default();
    render_status(frame, layout[4], &status);
    render_help(frame, layout[5], WizardStep::BrowseRecords);
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, session: &Session) {
    let header = Row::new(Column::ALL.iter().map(|column| {
        Cell::from(column.label()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = session.table.rows();
    let cursor = session.table.cursor().get();
    let range = session.table.visible_range();
    let body = rows
        .iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .filter_map(|(index, row)| {
            let record = session.store.get(row.id)?;
            let cells = Column::ALL
                .iter()
                .map(|column| match column {
                    Column::Selector => Cell::from(selector_cell(row.selected)),
                    _ => Cell::from(record.field_text(*column).unwrap_or_default().to_owned()),
                })
                .collect::<Vec<_>>();
            let mut style = Style::default();
            if row.selected {
                style = style.fg(Color::Green);
            }
            if index == cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Some(Row::new(cells).style(style))
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(16),
        Constraint::Min(12),
        Constraint::Length(20),
        Constraint::Min(12),
        Constraint::Length(20),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(
                    &session.metadata_type,
                    rows.len(),
                    session.store.len(),
                    session.store.selected_count(),
                ))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn step_header(active: WizardStep) -> Paragraph<'static> {
    let text = WizardStep::ALL
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let label = format!("{}. {}", index + 1, step.label());
            if *step == active {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    Paragraph::new(format!("metapick  {text}")).style(Style::default().fg(Color::White))
}

fn render_status(frame: &mut ratatui::Frame<'_>, area: Rect, status: &str) {
    let widget = Paragraph::new(status.to_owned()).style(Style::default().fg(Color::Yellow));
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut ratatui::Frame<'_>, area: Rect, step: WizardStep) {
    let widget = Paragraph::new(help_text(step)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(widget, area);
}

pub(crate) fn filter_banner_text(filter: &FilterState) -> String {
    format!(
        "Filtering by: {} (Press [Tab] to switch)",
        filter.active_column.label()
    )
}

pub(crate) fn table_title(metadata_type: &str, shown: usize, total: usize, selected: usize) -> String {
    format!("{metadata_type} {shown}/{total} shown, {selected} selected")
}

pub(crate) fn type_hint_text(highlighted: Option<&str>, loaded: &str) -> Option<String> {
    let highlighted = highlighted?;
    if highlighted == loaded {
        return None;
    }
    Some(format!(
        "records are loaded for {loaded}; relaunch with --metadata-type {highlighted} to browse {highlighted}"
    ))
}

pub(crate) fn help_text(step: WizardStep) -> &'static str {
    match step {
        WizardStep::PickType => "up/down move  right next  left back  esc quit",
        WizardStep::BrowseRecords => {
            "type to search  tab column  enter toggle  ctrl-u clear  left back  esc quit"
        }
    }
}

pub(crate) fn selector_cell(selected: bool) -> &'static str {
    if selected {
        SELECTED_GLYPH
    } else {
        UNSELECTED_GLYPH
    }
}
