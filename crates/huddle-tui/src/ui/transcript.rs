//! Transcript pane
//!
//! Displays the finalized captions, newest at the bottom.

use huddle_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the transcript pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.flags().captions { " Transcript (live) " } else { " Transcript " };
    let block = Block::default().borders(Borders::ALL).title(title);

    let entries = app.transcript().entries();
    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Captions appear here once enabled [t]",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}:", entry.speaker),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(entry.text.clone()),
                ]))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}
