// Planet list rendering.
// Provides the styled planets list plus loading, error, and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::model::Planet;

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message with the retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::styled(format!("❌ {}", error), Style::default().fg(Color::Red)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Index of the last row on screen for a list scrolled to `offset` showing `rows` rows.
pub fn last_visible_index(offset: usize, rows: usize, total: usize) -> Option<usize> {
    if total == 0 || rows == 0 || offset >= total {
        return None;
    }
    Some((offset + rows).min(total) - 1)
}

/// Render the planets list. Returns the index of the last visible planet.
pub fn render_planets_list(
    frame: &mut Frame,
    planets: &[Planet],
    list_state: &mut ListState,
    loading_more: bool,
    area: Rect,
) -> Option<usize> {
    if planets.is_empty() {
        render_empty(frame, area, "No planets found");
        return None;
    }

    let mut items: Vec<ListItem> = planets
        .iter()
        .map(|planet| {
            ListItem::new(Line::from(vec![
                Span::styled(&planet.name, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  {}", planet.terrain),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  pop. {}", planet.population),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    if loading_more {
        items.push(ListItem::new(Line::styled(
            "⏳ Loading more planets...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let title = format!(" Planets ({}) ", planets.len());
    let list_widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, list_state);

    let rows = area.height.saturating_sub(2) as usize;
    last_visible_index(list_state.offset(), rows, planets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_visible_index() {
        assert_eq!(last_visible_index(0, 10, 60), Some(9));
        assert_eq!(last_visible_index(55, 10, 60), Some(59));
        assert_eq!(last_visible_index(0, 10, 3), Some(2));
    }

    #[test]
    fn test_nothing_visible() {
        assert_eq!(last_visible_index(0, 10, 0), None);
        assert_eq!(last_visible_index(0, 0, 10), None);
        assert_eq!(last_visible_index(10, 5, 10), None);
    }
}
