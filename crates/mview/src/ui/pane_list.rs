use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::nav::PaneView;
use crate::util::fit_to_width;

/// Bordered list widget for one hierarchy pane.
///
/// Draws the rows starting at the view's scroll offset; the offset itself is
/// owned by the navigation controller.
pub struct PaneList<'a> {
    pub title: &'a str,
    pub view: PaneView<'a>,
    pub focused: bool,
}

impl<'a> PaneList<'a> {
    pub fn new(title: &'a str, view: PaneView<'a>, focused: bool) -> Self {
        Self {
            title,
            view,
            focused,
        }
    }

    fn block(&self) -> Block<'a> {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = match self.view.selected {
            Some(sel) => format!(" {} ({}/{}) ", self.title, sel + 1, self.view.items.len()),
            None => format!(" {} ({}) ", self.title, self.view.items.len()),
        };

        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style)
    }
}

impl Widget for PaneList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if let Some(err) = self.view.error {
            Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        if self.view.items.is_empty() {
            Paragraph::new("(empty)")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let selected_style = if self.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };

        let rows = self
            .view
            .items
            .iter()
            .enumerate()
            .skip(self.view.offset)
            .take(inner.height as usize);

        for (row, (idx, item)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let style = if self.view.selected == Some(idx) {
                selected_style
            } else {
                Style::default()
            };

            let line_area = Rect::new(inner.x, y, inner.width, 1);
            buf.set_style(line_area, style);
            let text = fit_to_width(item, inner.width as usize);
            buf.set_stringn(inner.x, y, text, inner.width as usize, style);
        }
    }
}
