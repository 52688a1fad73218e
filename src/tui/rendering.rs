use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{MessageType, StatusMessage};
use super::layout::{centered_rect, AppLayout, SearchLayout};
use crate::models::Stats;
use crate::session::{
    Page, PanelField, ResultCard, SearchPanel, SettingsItem, SettingsOverlay, Theme,
};
use crate::ui::content::{self, Feature, Highlight};
use crate::utils::format_number;

/// Everything a frame needs
pub struct RenderState<'a> {
    pub page: Page,
    pub panel: &'a SearchPanel,
    pub settings: &'a SettingsOverlay,
    pub cards: &'a [ResultCard],
    pub scroll: usize,
    pub stats: Option<&'a Stats>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub background: Color,
    pub bar: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::Rgb(250, 250, 250),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(129, 140, 248),
                highlight: Color::Rgb(192, 132, 252),
                background: Color::Rgb(9, 9, 11),
                bar: Color::Rgb(24, 24, 27),
                success: Color::Rgb(16, 185, 129),
                error: Color::Rgb(239, 68, 68),
            },
            Theme::Light => Self {
                text: Color::Rgb(24, 24, 27),
                muted: Color::Rgb(82, 82, 91),
                accent: Color::Rgb(79, 70, 229),
                highlight: Color::Rgb(147, 51, 234),
                background: Color::Rgb(250, 250, 250),
                bar: Color::Rgb(228, 228, 231),
                success: Color::Rgb(5, 150, 105),
                error: Color::Rgb(220, 38, 38),
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    fn block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let border = if focused { self.accent } else { self.muted };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
    }
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let palette = Palette::for_theme(state.settings.theme());
    let area = frame.area();
    let layout = AppLayout::new(area);

    frame.render_widget(Block::default().style(palette.base()), area);

    render_nav_bar(frame, layout.nav_area, state.page, &palette);
    match state.page {
        Page::Welcome => render_welcome(frame, layout.body_area, &palette),
        Page::Search => render_search(frame, layout.body_area, state, &palette),
        Page::About => render_about(frame, layout.body_area, state.stats, &palette),
    }
    render_status_bar(frame, layout.status_area, state, &palette);

    if state.settings.is_open() {
        render_settings(frame, layout.body_area, state.settings, &palette);
    }
}

fn render_nav_bar(frame: &mut Frame, area: Rect, current: Page, palette: &Palette) {
    let mut spans = vec![Span::styled(
        format!(" 🔬 {} ", content::APP_NAME),
        palette.heading(),
    )];

    for (idx, page) in Page::ALL.iter().enumerate() {
        let label = format!(" F{} {} ", idx + 1, page.label());
        let style = if *page == current {
            Style::default()
                .fg(palette.text)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.muted()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }
    spans.push(Span::styled("  F4 Settings", palette.muted()));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar)),
        area,
    );
}

fn feature_lines<'a>(features: &'a [Feature], palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for feature in features {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(palette.accent)),
            Span::styled(feature.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", feature.description),
            palette.muted(),
        )));
    }
    lines
}

fn highlight_line<'a>(highlights: &'a [Highlight], palette: &Palette) -> Line<'a> {
    let mut spans = Vec::new();
    for h in highlights {
        spans.push(Span::styled(
            format!("  {} ", h.value),
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(h.label));
    }
    Line::from(spans)
}

fn render_welcome(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("✨ {}", content::TAGLINE),
            Style::default().fg(palette.highlight),
        )),
        Line::from(Span::styled(content::HEADLINE, palette.heading())),
        Line::from(""),
        Line::from(content::INTRO),
        Line::from(""),
        highlight_line(&content::WELCOME_HIGHLIGHTS, palette),
        Line::from(""),
        Line::from(Span::styled("Powerful Features", palette.heading())),
    ];
    lines.extend(feature_lines(&content::WELCOME_FEATURES, palette));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        content::CALL_TO_ACTION,
        palette.heading(),
    )));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to start searching"),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(palette.block(" Home ", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_about(frame: &mut Frame, area: Rect, stats: Option<&Stats>, palette: &Palette) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("About {}", content::APP_NAME),
            palette.heading(),
        )),
        Line::from(""),
        Line::from(Span::styled("Our Mission", palette.heading())),
        Line::from(content::MISSION),
        Line::from(""),
        Line::from(Span::styled("What Makes Us Different", palette.heading())),
    ];
    lines.extend(feature_lines(&content::ABOUT_FEATURES, palette));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Built With Modern Technology",
        palette.heading(),
    )));
    for tech in &content::TECHNOLOGIES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<14}", tech.title),
                Style::default().fg(palette.success),
            ),
            Span::styled(tech.description, palette.muted()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Platform Statistics", palette.heading())));
    lines.push(highlight_line(&content::ABOUT_HIGHLIGHTS, palette));
    if let Some(stats) = stats {
        lines.push(Line::from(Span::styled(
            format!(
                "  Live index: {} papers, latest year {}, spanning {} years",
                format_number(stats.total_papers),
                stats.latest_year,
                stats.year_span
            ),
            palette.muted(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Get In Touch", palette.heading())));
    lines.push(Line::from(content::CONTACT));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(palette.block(" About ", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_search(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let panel = state.panel;
    let layout = SearchLayout::new(area, panel.filters_visible());

    let input_title = format!(" Search ({} mode, Ctrl+T to switch) ", panel.mode().label());
    let query_focused = panel.focus() == PanelField::Query;
    let input = Paragraph::new(input_line(panel.query(), query_focused, palette))
        .block(palette.block(&input_title, query_focused));
    frame.render_widget(input, layout.input_area);

    if panel.filters_visible() {
        render_filters(frame, &layout, panel, palette);
    }

    render_summary(frame, layout.summary_area, panel, palette);
    render_results(frame, layout.results_area, state, palette);
}

fn input_line<'a>(value: &'a str, focused: bool, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::raw(value)];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
    }
    Line::from(spans)
}

fn render_filters(frame: &mut Frame, layout: &SearchLayout, panel: &SearchPanel, palette: &Palette) {
    let [year_area, category_area, author_area] = layout.filter_columns();
    let filters = panel.filters();
    let focus = panel.focus();

    let year = if filters.year.is_empty() {
        "All Years"
    } else {
        filters.year.as_str()
    };
    let year_line = Line::from(vec![
        Span::styled("◂ ", palette.muted()),
        Span::raw(year),
        Span::styled(" ▸", palette.muted()),
    ]);
    let year_title = format!(" {} ", PanelField::Year.label());
    frame.render_widget(
        Paragraph::new(year_line).block(palette.block(&year_title, focus == PanelField::Year)),
        year_area,
    );

    for (field, value, field_area) in [
        (PanelField::Category, filters.category.as_str(), category_area),
        (PanelField::Author, filters.author.as_str(), author_area),
    ] {
        let title = format!(" {} ", field.label());
        let focused = focus == field;
        frame.render_widget(
            Paragraph::new(input_line(value, focused, palette))
                .block(palette.block(&title, focused)),
            field_area,
        );
    }
}

fn render_summary(frame: &mut Frame, area: Rect, panel: &SearchPanel, palette: &Palette) {
    let lines = if panel.is_searching() {
        vec![Line::from(Span::styled(
            "Searching...",
            Style::default().fg(palette.highlight),
        ))]
    } else if !panel.results().is_empty() {
        vec![
            Line::from(Span::styled(panel.summary(), palette.heading())),
            Line::from(Span::styled(panel.mode_caption(), palette.muted())),
        ]
    } else if let Some(error) = panel.last_error() {
        vec![Line::from(Span::styled(
            error,
            Style::default().fg(palette.error),
        ))]
    } else {
        vec![Line::from(Span::styled(
            "Enter: search | Tab: next field | Ctrl+F: filters",
            palette.muted(),
        ))]
    };
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let panel = state.panel;
    let mut lines: Vec<Line> = Vec::new();

    if let Some(explanation) = panel.explanation() {
        if !panel.is_searching() {
            lines.push(Line::from(Span::styled(
                "✨ AI Assistant",
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(explanation));
            lines.push(Line::from(""));
        }
    }

    if panel.show_empty_state() {
        lines.push(Line::from(Span::styled(
            "No Results Found",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "Try adjusting your search terms or filters to find relevant papers.",
            palette.muted(),
        )));
        lines.push(Line::from(vec![
            Span::styled("Ctrl+A", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" adjust filters", palette.muted()),
        ]));
        lines.push(Line::from(""));
    }

    for card in state.cards.iter().skip(state.scroll) {
        lines.extend(card_lines(card, palette));
    }

    let title = if state.cards.is_empty() {
        " Results ".to_string()
    } else {
        format!(" Results {}/{} ", state.scroll + 1, state.cards.len())
    };
    let paragraph = Paragraph::new(Text::from(lines))
        .block(palette.block(&title, false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn card_lines<'a>(card: &'a ResultCard, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(card.abstract_text.as_str()),
    ];

    let mut meta = vec![Span::styled(format!("📅 {}", card.date), palette.muted())];
    if let Some(authors) = &card.authors {
        meta.push(Span::styled(format!("  👥 {}", authors), palette.muted()));
    }
    lines.push(Line::from(meta));

    if !card.categories.is_empty() {
        let mut tags: Vec<Span> = card
            .categories
            .iter()
            .map(|c| Span::styled(format!("[{}] ", c), Style::default().fg(palette.success)))
            .collect();
        if let Some(badge) = card.overflow_badge() {
            tags.push(Span::styled(badge, palette.muted()));
        }
        lines.push(Line::from(tags));
    }
    lines.push(Line::from(""));
    lines
}

fn render_settings(frame: &mut Frame, area: Rect, settings: &SettingsOverlay, palette: &Palette) {
    let popup = centered_rect(48, (SettingsItem::ALL.len() * 2 + 4) as u16, area);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for item in SettingsItem::ALL {
        let selected = item == settings.selected();
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, item.label()),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", item.description(settings.theme())),
            palette.muted(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select | Enter apply | Esc close",
        palette.muted(),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(palette.base())
        .block(palette.block(" Settings ", true));
    frame.render_widget(paragraph, popup);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let bar = Style::default().bg(palette.bar);

    let (text, style) = if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => palette.success,
            MessageType::Info => palette.accent,
            MessageType::Error => palette.error,
        };
        (format!(" {} ", msg.text), bar.fg(color))
    } else {
        let hints = match state.page {
            _ if state.settings.is_open() => "Esc: close settings | Ctrl+C: quit",
            Page::Search => {
                "Enter: search | Tab: field | Ctrl+F: filters | Ctrl+T: mode | ↑/↓: scroll | Esc: home"
            }
            Page::Welcome => "Enter: get started | F1-F3: pages | F4: settings | q: quit",
            Page::About => "F1-F3: pages | F4: settings | q: quit",
        };
        (format!(" {} ", hints), bar.fg(palette.text))
    };

    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Left),
        area,
    );
}
