// Modal UI components.
// Planet details and help overlays drawn on top of the list.

use ratatui::{prelude::*, widgets::*};

use crate::model::Planet;

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Label/value pairs shown in the details modal.
pub fn planet_fields(planet: &Planet) -> [(&'static str, &str); 10] {
    [
        ("Rotation Period", planet.rotation_period.as_str()),
        ("Orbital Period", planet.orbital_period.as_str()),
        ("Diameter", planet.diameter.as_str()),
        ("Climate", planet.climate.as_str()),
        ("Gravity", planet.gravity.as_str()),
        ("Terrain", planet.terrain.as_str()),
        ("Surface Water", planet.surface_water.as_str()),
        ("Population", planet.population.as_str()),
        ("Created", planet.created.as_str()),
        ("Edited", planet.edited.as_str()),
    ]
}

/// Draw the details of the selected planet.
pub fn draw_planet_details(frame: &mut Frame, planet: &Planet) {
    let modal_area = centered(frame.area(), 64, 16);
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Fields
            Constraint::Length(1), // Instructions
        ])
        .split(modal_area);

    let lines: Vec<Line> = planet_fields(planet)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:>16}: ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", planet.name));
    let details = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Back ", Style::default().fg(Color::DarkGray)),
    ]);
    let instructions_widget = Paragraph::new(instructions).alignment(Alignment::Center);
    frame.render_widget(instructions_widget, chunks[1]);
}

/// Draw the keyboard help overlay.
pub fn draw_help(frame: &mut Frame) {
    let modal_area = centered(frame.area(), 44, 12);
    frame.render_widget(Clear, modal_area);

    let keys = [
        ("↑↓ / j k", "Move"),
        ("PgUp PgDn", "Move by page"),
        ("Home End", "First / last"),
        ("Enter", "Planet details"),
        ("r", "Reload / retry"),
        ("?", "Toggle help"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );
    frame.render_widget(help, modal_area);
}
