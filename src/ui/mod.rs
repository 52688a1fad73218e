//! Terminal output for the command-line surface.
//!
//! Colored status lines, the welcome banner, result cards and tables, and a
//! spinner shown while a request is in flight.

pub mod content;

use comfy_table::{Attribute, Cell, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::time::Duration;

use crate::models::Stats;
use crate::session::ResultCard;
use crate::utils::{format_number, truncate_with_ellipsis};

use content::{Feature, Highlight};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Welcome banner with the feature list.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");

    println!();
    println!(
        "{} {}",
        format!("🔬 {}", content::APP_NAME).bold().cyan(),
        format!("v{}", version).dimmed()
    );
    println!("{}", content::TAGLINE.magenta());
    println!();
    println!("{}", content::HEADLINE.bold());
    println!("{}", content::INTRO);

    print_highlights(&content::WELCOME_HIGHLIGHTS);

    print_section("Powerful Features");
    print_features(&content::WELCOME_FEATURES);

    println!();
    println!("{}", content::CALL_TO_ACTION.bold());
    println!("  research-hub              {}", "open the interactive client".dimmed());
    println!("  research-hub search \"transformer attention\"");
    println!();
}

/// About page text.
pub fn print_about() {
    println!();
    println!("{}", format!("About {}", content::APP_NAME).bold().cyan());

    print_section("Our Mission");
    println!("{}", content::MISSION);

    print_section("What Makes Us Different");
    print_features(&content::ABOUT_FEATURES);

    print_section("Built With Modern Technology");
    for tech in &content::TECHNOLOGIES {
        println!("  {:<14} {}", tech.title.green(), tech.description.dimmed());
    }

    print_section("Platform Statistics");
    print_highlights(&content::ABOUT_HIGHLIGHTS);

    print_section("Get In Touch");
    println!("{}", content::CONTACT);
    println!();
}

fn print_features(features: &[Feature]) {
    for feature in features {
        println!("  {} {}", "•".cyan(), feature.title.bold());
        println!("    {}", feature.description.dimmed());
    }
}

fn print_highlights(highlights: &[Highlight]) {
    println!();
    let line: Vec<String> = highlights
        .iter()
        .map(|h| format!("{} {}", h.value.bold().yellow(), h.label))
        .collect();
    println!("  {}", line.join("   "));
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(terminal_width().min(80)).dimmed());
}

/// `Found N papers` plus the mode caption.
pub fn print_search_summary(summary: &str, caption: &str) {
    println!();
    println!("{} {}", status_icon(Status::Search).yellow().bold(), summary.bold());
    println!("{}", caption.dimmed());
}

/// The backend's natural-language explanation.
pub fn print_explanation(explanation: &str) {
    println!();
    println!("{} {}", "✨".magenta(), "AI Assistant".bold().magenta());
    println!("{}", explanation);
}

/// Hint shown when a search came back empty.
pub fn print_empty_state() {
    println!();
    println!("{}", "No Results Found".bold());
    println!(
        "{}",
        "Try adjusting your search terms or filters to find relevant papers.".dimmed()
    );
}

/// Print one result card.
pub fn print_card(card: &ResultCard) {
    println!();
    for line in card_lines(card, terminal_width().min(100)) {
        println!("{}", line);
    }
    print_divider();
}

/// Styled lines of a card, title cut to `width` columns
fn card_lines(card: &ResultCard, width: usize) -> Vec<String> {
    let mut lines = vec![
        truncate_with_ellipsis(&card.title, width)
            .blue()
            .bold()
            .to_string(),
        card.abstract_text.clone(),
    ];

    if let Some(authors) = &card.authors {
        lines.push(format!("{} {}", "Authors:".dimmed(), authors));
    }
    lines.push(format!("{} {}", "Published:".dimmed(), card.date.yellow()));

    if !card.categories.is_empty() {
        let mut tags: Vec<String> = card
            .categories
            .iter()
            .map(|c| format!("[{}]", c).green().to_string())
            .collect();
        if let Some(badge) = card.overflow_badge() {
            tags.push(badge.dimmed().to_string());
        }
        lines.push(tags.join(" "));
    }
    lines
}

/// Aggregate counts as a two-column table, followed by the per-year counts.
pub fn stats_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total papers"),
        Cell::new(format_number(stats.total_papers)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Latest year"), Cell::new(&stats.latest_year)]);
    table.add_row(vec![Cell::new("Year span"), Cell::new(stats.year_span)]);

    for (year, count) in stats.papers_by_year.iter().rev() {
        table.add_row(vec![
            Cell::new(format!("  {}", year)),
            Cell::new(format_number(*count)),
        ]);
    }
    table
}

/// Spinner shown while a request is in flight.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message. Hidden when stdout is
    /// not a terminal.
    pub fn new(msg: &str) -> Self {
        let pb = if is_terminal() {
            indicatif::ProgressBar::new_spinner()
        } else {
            indicatif::ProgressBar::hidden()
        };
        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Finish with success message.
    pub fn finish_with_success(&self, msg: &str) {
        self.finish_styled("{spinner:.green} {msg}", "✓", msg);
    }

    /// Finish with error message.
    pub fn finish_with_error(&self, msg: &str) {
        self.finish_styled("{spinner:.red} {msg}", "✗", msg);
    }

    /// Remove the spinner without a message.
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    fn finish_styled(&self, template: &str, tick: &str, msg: &str) {
        if let Ok(style) = indicatif::ProgressStyle::with_template(template) {
            self.pb.set_style(style.tick_chars(&format!("{} ", tick)));
        }
        self.pb.finish_with_message(msg.to_string());
    }
}
