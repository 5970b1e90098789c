// UI module for rendering the TUI.
// Contains the header, planets list, status bar, and modal overlays.

mod list;
mod modal;

use chrono::Local;
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::model::PageOrigin;
use crate::repository::PlanetRepository;
use crate::state::PlanetsUiState;

/// Main draw function that renders the entire UI.
pub fn draw<R: PlanetRepository + 'static>(frame: &mut Frame, app: &mut App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if let Some(planet) = app.planets.selected() {
        modal::draw_planet_details(frame, planet);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        modal::draw_help(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("🪐 ", Style::default()),
        Span::styled(
            "Star Wars Planet Viewer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

/// Draw the main content area based on the view state.
fn draw_content<R: PlanetRepository + 'static>(frame: &mut Frame, app: &mut App<R>, area: Rect) {
    let loading_more = app.planets.is_loading_more();
    app.last_visible = match app.planets.state() {
        PlanetsUiState::Loading => {
            list::render_loading(frame, area, "Loading planets");
            None
        }
        PlanetsUiState::Error(message) => {
            list::render_error(frame, area, message);
            None
        }
        PlanetsUiState::Success(planets) => {
            list::render_planets_list(frame, planets, &mut app.list_state, loading_more, area)
        }
    };
}

/// Draw the status bar with counts, cache origin, and key hints.
fn draw_status_bar<R: PlanetRepository + 'static>(frame: &mut Frame, app: &App<R>, area: Rect) {
    let mut spans = Vec::new();

    if let PlanetsUiState::Success(planets) = app.planets.state() {
        spans.push(Span::styled(
            format!(" {} planets ", planets.len()),
            Style::default().fg(Color::White),
        ));
        if app.planets.next_page_url().is_none() {
            spans.push(Span::styled("(all loaded) ", Style::default().fg(Color::DarkGray)));
        }
    }

    if let PageOrigin::Cache { cached_at } = app.planets.origin() {
        let label = match cached_at {
            Some(at) => format!(
                " OFFLINE · cached {} ",
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            None => " OFFLINE · cached ".to_string(),
        };
        spans.push(Span::styled(
            label,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        " ?:help  r:reload  q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
