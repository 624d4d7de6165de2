//! Top-level rendering coordinator.
//!
//! Lays out a [`ListViewModel`] as text: header and tabs, toast banner,
//! delete prompt, rows (or the empty state), then the footer. Sponsored slots
//! are filled from `ads`; a slot with no item renders nothing.
//!
//! # Example
//!
//! ```rust
//! use futurejoy::app::ViewSnapshot;
//! use futurejoy::ui::{render, ListViewModel, RenderOptions};
//! use std::collections::BTreeMap;
//!
//! let vm = ListViewModel::compute(&ViewSnapshot::default(), chrono::Local::now().date_naive(), 10);
//! let screen = render(&vm, &BTreeMap::new(), RenderOptions::plain(80));
//! assert!(screen.contains("FutureJoy"));
//! ```

use super::helpers::{bg, bold, dim, fg, reset, truncate};
use super::viewmodel::{DisplayItem, ListViewModel, Row};
use crate::ads::SponsoredItem;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Brand color used for the header and day counters.
const ACCENT: (u8, u8, u8) = (115, 102, 242);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI escapes.
    pub color: bool,
    /// Terminal width in columns.
    pub cols: usize,
}

impl RenderOptions {
    #[must_use]
    pub const fn plain(cols: usize) -> Self {
        Self { color: false, cols }
    }

    #[must_use]
    pub const fn colored(cols: usize) -> Self {
        Self { color: true, cols }
    }
}

struct Painter {
    out: String,
    color: bool,
}

impl Painter {
    fn styled(&mut self, style: &str, text: &str) {
        if self.color {
            self.out.push_str(style);
            self.out.push_str(text);
            self.out.push_str(reset());
        } else {
            self.out.push_str(text);
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }
}

/// Renders the screen to a string.
#[must_use]
pub fn render(vm: &ListViewModel, ads: &BTreeMap<usize, SponsoredItem>, options: RenderOptions) -> String {
    let mut p = Painter {
        out: String::new(),
        color: options.color,
    };
    let cols = options.cols.max(20);

    render_header(&mut p, vm);

    if let Some(toast) = &vm.toast {
        let style = format!("{}{}{}", bg(toast.style.rgb()), fg(WHITE), bold());
        p.styled(&style, &format!(" {} ", truncate(&toast.text, cols - 2)));
        p.newline();
    }

    if let Some(prompt) = &vm.confirmation {
        p.styled(bold(), "Delete Event");
        p.newline();
        p.line(prompt);
    }

    p.newline();
    if let Some(empty) = &vm.empty_state {
        p.styled(bold(), &empty.message);
        p.newline();
        p.styled(dim(), &empty.subtitle);
        p.newline();
    } else {
        for row in &vm.rows {
            match row {
                Row::Event(item) => render_item(&mut p, item, cols),
                Row::Sponsored { slot } => {
                    if let Some(ad) = ads.get(slot) {
                        render_sponsored(&mut p, ad, cols);
                    }
                }
            }
        }
    }

    p.newline();
    p.styled(dim(), &truncate(&vm.footer.keybindings, cols));
    p.newline();
    p.out
}

fn render_header(p: &mut Painter, vm: &ListViewModel) {
    let title_style = format!("{}{}", fg(ACCENT), bold());
    p.styled(&title_style, &format!("📅 {}", vm.header.title));
    p.newline();
    p.styled(dim(), &vm.header.subtitle);
    p.newline();

    for (i, (filter, active)) in vm.header.tabs.iter().enumerate() {
        if i > 0 {
            p.out.push_str("  ");
        }
        if *active {
            p.styled(bold(), &format!("[{}]", filter.title()));
        } else {
            p.out.push_str(&format!(" {} ", filter.title()));
        }
    }
    if let Some(status) = &vm.header.selection_status {
        p.out.push_str("  · ");
        p.out.push_str(status);
    }
    p.newline();

    if vm.composer_open {
        p.styled(bold(), "+ Add New Event");
        p.newline();
    }
}

fn render_item(p: &mut Painter, item: &DisplayItem, cols: usize) {
    let counter = format!("{:>5} {:<4}", item.days, item.days_unit);
    let mark = match item.checkbox {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };
    let prefix = format!("{:>3}. {mark}{} ", item.number, item.emoji);
    let title_room = cols.saturating_sub(prefix.chars().count() + counter.len() + 2);

    let _ = write!(p.out, "{prefix}");
    p.styled(bold(), &truncate(&item.title, title_room));
    let pad = title_room.saturating_sub(item.title.chars().count().min(title_room));
    p.out.push_str(&" ".repeat(pad + 1));
    p.styled(&format!("{}{}", fg(ACCENT), bold()), &counter);
    p.newline();

    let mut detail = item.date_label.clone();
    if let Some(location) = &item.location {
        let _ = write!(detail, " · {location}");
    }
    if let Some(category) = &item.category {
        let _ = write!(detail, " · {category}");
    }
    p.out.push_str("       ");
    p.styled(dim(), &truncate(&detail, cols.saturating_sub(7)));
    p.newline();
}

fn render_sponsored(p: &mut Painter, ad: &SponsoredItem, cols: usize) {
    p.out.push_str("     ");
    p.styled(dim(), "Sponsored · ");
    p.styled(bold(), &truncate(&ad.headline, cols.saturating_sub(20)));
    p.newline();
    p.out.push_str("       ");
    let body = if ad.body.is_empty() {
        format!("{} · {}", ad.advertiser, ad.call_to_action)
    } else {
        format!("{} · {}", ad.body, ad.call_to_action)
    };
    p.styled(dim(), &truncate(&body, cols.saturating_sub(7)));
    p.newline();
}
