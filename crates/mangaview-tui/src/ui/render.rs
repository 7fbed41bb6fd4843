use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use mangaview_core::models::SlideRecord;

use crate::app::{App, OfflineStatus};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    if app.screen.chrome_hidden {
        render_viewer(frame, app, frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(5),    // Slides
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_viewer(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  mangaview";
    let deck = app.controller.deck();
    let position = if deck.is_empty() {
        String::new()
    } else {
        format!("{} / {}", app.controller.current_index() + 1, deck.len())
    };
    let button = app
        .controller
        .fullscreen_glyph()
        .map(|g| format!("[f] {}", g.symbol()))
        .unwrap_or_default();
    let right = format!("{}   {}", position, button);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.chars().count() + right.chars().count() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

/// Where a slide with the given translation lands inside `area`, clipped.
/// Slides a full page or more away are not drawn.
pub fn slide_rect(area: Rect, translation: f64) -> Option<Rect> {
    if translation.abs() >= 100.0 || area.height == 0 {
        return None;
    }
    let shift = (translation / 100.0 * area.height as f64).round() as i32;
    let top = area.y as i32 + shift;
    let bottom = top + area.height as i32;

    let clipped_top = top.max(area.y as i32);
    let clipped_bottom = bottom.min(area.bottom() as i32);
    if clipped_bottom <= clipped_top {
        return None;
    }
    Some(Rect::new(
        area.x,
        clipped_top as u16,
        area.width,
        (clipped_bottom - clipped_top) as u16,
    ))
}

fn render_viewer(frame: &mut Frame, app: &App, area: Rect) {
    let deck = app.controller.deck();
    if deck.is_empty() {
        let message = Paragraph::new(Line::from(Span::styled(
            "No manga available",
            styles::muted_style(),
        )))
        .alignment(Alignment::Center);
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1));
        frame.render_widget(message, middle);
        return;
    }

    let translations = &app.controller.frame().translations;
    for (slide, &translation) in deck.iter().zip(translations.iter()) {
        if let Some(rect) = slide_rect(area, translation) {
            let focused = slide.index == app.controller.current_index();
            render_slide(frame, slide, deck.len(), focused, rect);
        }
    }
}

fn render_slide(frame: &mut Frame, slide: &SlideRecord, total: usize, focused: bool, area: Rect) {
    let image = match &slide.image_url {
        Some(url) => Span::styled(url.clone(), styles::highlight_style()),
        None => Span::styled("(image missing)", styles::error_style()),
    };
    let link = match &slide.link_url {
        Some(url) => Span::styled(url.clone(), styles::link_style()),
        None => Span::styled("(no article)", styles::muted_style()),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(slide.alt_text(), styles::title_style())),
        Line::from(""),
        Line::from(vec![Span::styled("image    ", styles::muted_style()), image]),
        Line::from(vec![Span::styled("article  ", styles::muted_style()), link]),
    ];

    let block = Block::default()
        .title(format!(" {} / {} ", slide.index + 1, total))
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ↑/k", styles::help_key_style()),
        Span::styled(" prev  ", styles::help_desc_style()),
        Span::styled("↓/j", styles::help_key_style()),
        Span::styled(" next  ", styles::help_desc_style()),
        Span::styled("drag", styles::help_key_style()),
        Span::styled(" swipe  ", styles::help_desc_style()),
    ];
    if app.controller.fullscreen_glyph().is_some() {
        spans.push(Span::styled("f", styles::help_key_style()));
        spans.push(Span::styled(" fullscreen  ", styles::help_desc_style()));
    }
    spans.extend([
        Span::styled("o", styles::help_key_style()),
        Span::styled(" open article  ", styles::help_desc_style()),
        Span::styled("q", styles::help_key_style()),
        Span::styled(" quit", styles::help_desc_style()),
    ]);

    let offline_style = match app.offline {
        OfflineStatus::Installed { .. } => styles::success_style(),
        OfflineStatus::Failed(_) => styles::error_style(),
        OfflineStatus::Disabled => styles::muted_style(),
    };
    let mut info = vec![Span::styled(format!(" {}", app.offline.label()), offline_style)];
    if let Some(ref message) = app.status_message {
        info.push(Span::styled(format!("  {}", message), styles::muted_style()));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans), Line::from(info)])
        .style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}
