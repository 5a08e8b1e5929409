/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: 2026-10-13 Read only the visible tail of the shared log buffer
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use taskdesk_tui::logging::{LogBufferHandle, lock_buffer};

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let available = area.height.saturating_sub(2) as usize;
    let text: Vec<Line> = lock_buffer(buffer)
        .tail(available)
        .into_iter()
        .map(Line::from)
        .collect();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Logs"),
    );
    frame.render_widget(log_widget, area);
}
