use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::catalog::Catalog;
use crate::input::TextInput;
use crate::state::storefront::{StorefrontEvent, StorefrontState, Tab};
use crate::state::Navigate;
use crate::tui::{self, ACCENT_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const TAGLINES: &[&str] = &[
    "Shop the latest tech with flexible payment options",
    "Pay a little now, the rest over time.",
    "Akwaaba! Your next gadget is a deposit away.",
    "Deposits from 10%. Financing from five banks.",
];

pub struct StorefrontView {
    state: StorefrontState,
    search: TextInput,
    searching: bool,
    tagline: String,
    table_state: TableState,
}

impl StorefrontView {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let tagline = TAGLINES.choose(&mut rng).unwrap_or(&TAGLINES[0]).to_string();
        Self {
            state: StorefrontState::default(),
            search: TextInput::default(),
            searching: false,
            tagline,
            table_state: TableState::default(),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, catalog: &Catalog) -> Navigate {
        if self.searching {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                KeyCode::Up | KeyCode::Down => {
                    self.searching = false;
                    return self.handle_key(code, catalog);
                }
                other => {
                    if self.search.handle_key(other) {
                        let query = self.search.value().to_string();
                        return self.state.apply(StorefrontEvent::SetQuery(query), catalog);
                    }
                }
            }
            return Navigate::Stay;
        }

        let event = match code {
            KeyCode::Char('q') | KeyCode::Esc => return Navigate::Quit,
            KeyCode::Tab | KeyCode::Right => StorefrontEvent::NextTab,
            KeyCode::BackTab | KeyCode::Left => StorefrontEvent::PrevTab,
            KeyCode::Char('/') if self.state.tab() == Tab::Products => {
                self.searching = true;
                return Navigate::Stay;
            }
            KeyCode::Up => StorefrontEvent::MoveSelection(-1),
            KeyCode::Down => StorefrontEvent::MoveSelection(1),
            KeyCode::Enter | KeyCode::Char('b') => StorefrontEvent::Buy,
            KeyCode::Char('e') => StorefrontEvent::ToggleEditBio,
            KeyCode::Char('m') => StorefrontEvent::ToggleEditPayment,
            KeyCode::Char(c @ '1'..='4') => {
                StorefrontEvent::SelectTab(Tab::ALL[c as usize - '1' as usize])
            }
            _ => return Navigate::Stay,
        };
        self.state.apply(event, catalog)
    }

    pub fn draw(&mut self, frame: &mut Frame, catalog: &Catalog) {
        let area = frame.area();
        let header_height = if self.state.tab() == Tab::Products { 4 } else { 0 };
        let [header_area, content_area, tabs_area, hints_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        match self.state.tab() {
            Tab::Products => {
                self.draw_header(frame, header_area);
                self.draw_products(frame, content_area, catalog);
            }
            Tab::Profile => self.draw_profile(frame, content_area),
            Tab::Transactions => draw_placeholder(frame, content_area, Tab::Transactions, "Transaction history coming soon..."),
            Tab::Settings => draw_placeholder(frame, content_area, Tab::Settings, "Settings coming soon..."),
        }

        self.draw_tab_bar(frame, tabs_area);

        let hints = match (self.state.tab(), self.searching) {
            (Tab::Products, true) => " Type to search  Enter/Esc=done",
            (Tab::Products, false) => " \u{2191}/\u{2193}:select  Enter:buy now  /:search  Tab:next tab  q:quit",
            (Tab::Profile, _) => " e:edit bio  m:edit payment  Tab:next tab  q:quit",
            _ => " Tab:next tab  q:quit",
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let [title_area, search_area, tagline_area, _gap] =
            Layout::vertical([Constraint::Length(1); 4]).areas(area);
        frame.render_widget(Paragraph::new(" EasyPay").style(HEADER_STYLE), title_area);

        let shown = if self.searching || !self.search.value().is_empty() {
            self.search.display(self.searching)
        } else {
            "Search products...".to_string()
        };
        let style = if self.searching {
            SELECTED_STYLE
        } else {
            FOOTER_STYLE
        };
        let padded = format!(" \u{1f50d} {shown:<w$}", w = area.width.saturating_sub(5) as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, style)), search_area);
        frame.render_widget(
            Paragraph::new(format!(" {}", self.tagline)).style(FOOTER_STYLE),
            tagline_area,
        );
    }

    fn draw_products(&mut self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let products = catalog.filter(self.state.query());
        if products.is_empty() {
            frame.render_widget(
                Paragraph::new("No products match your search.")
                    .style(FOOTER_STYLE)
                    .alignment(Alignment::Center),
                area,
            );
            return;
        }

        let desc_width = area.width.saturating_sub(2 + 24 + 14 + 10 + 4).max(10) as usize;
        let rows: Vec<Row> = products
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (desc, lines) = tui::wrap_text(&p.description, desc_width);
                let buy = if i == self.state.selected() { "Buy Now" } else { "" };
                Row::new(vec![
                    Cell::from(p.name.clone()),
                    Cell::from(desc),
                    Cell::from(Span::styled(p.price.clone(), ACCENT_STYLE)),
                    Cell::from(buy),
                ])
                .height(lines)
            })
            .collect();

        let widths = [
            Constraint::Length(24),
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Length(10),
        ];
        self.table_state.select(Some(self.state.selected()));
        let table = Table::new(rows, widths)
            .header(Row::new(vec!["Product", "Description", "Price", ""]).style(HEADER_STYLE).bottom_margin(1))
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_profile(&self, frame: &mut Frame, area: Rect) {
        let profile = &self.state.profile;
        let payment = &self.state.payment;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let edit_label = |editing: bool| if editing { "\u{2713} Save" } else { "Edit" };
        let row = |label: &str, value: &str| Line::from(format!("   {label:<16}{value}"));

        let lines = vec![
            Line::from(Span::styled(format!(" ( {} )", profile.initials()), ACCENT_STYLE.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(format!(" {}", profile.name), bold)),
            Line::from(Span::styled(format!(" {}", profile.email), FOOTER_STYLE)),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Bio Data", HEADER_STYLE),
                Span::styled(format!("   [{}]", edit_label(self.state.editing_bio())), ACCENT_STYLE),
            ]),
            row("Full Name", &profile.name),
            row("Phone", &profile.phone),
            row("Date of Birth", &profile.date_of_birth),
            row("Hometown", &profile.hometown),
            row("Ghana Card", &profile.ghana_card),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Payment Data", HEADER_STYLE),
                Span::styled(format!("   [{}]", edit_label(self.state.editing_payment())), ACCENT_STYLE),
            ]),
            row("Card Number", &payment.card_number),
            row("Bank Name", &payment.bank_name),
            row("Account Type", &payment.account_type),
            Line::from(""),
            Line::from(Span::styled(" Security & Biometrics", HEADER_STYLE)),
            Line::from(vec![
                Span::raw("   Update Face Profile   "),
                Span::styled("Last updated 2 days ago  \u{203a}", FOOTER_STYLE),
            ]),
            Line::from(vec![
                Span::raw("   Update Fingerprint    "),
                Span::styled("Last updated 5 days ago  \u{203a}", FOOTER_STYLE),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let active = *tab == self.state.tab();
            let badge = tab.badge().map(|n| format!(" ({n})")).unwrap_or_default();
            let style = if active {
                ACCENT_STYLE.add_modifier(Modifier::BOLD)
            } else {
                FOOTER_STYLE
            };
            let block = Block::default().borders(Borders::TOP).border_style(FOOTER_STYLE);
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{} {}{badge}", tab.icon(), tab.label()), style))
                    .alignment(Alignment::Center)
                    .block(block),
                cells[i],
            );
        }
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, tab: Tab, text: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("{} {}", tab.icon(), tab.label()), HEADER_STYLE)),
        Line::from(Span::styled(text.to_string(), FOOTER_STYLE)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_mode_filters_and_buy_uses_result() {
        let catalog = Catalog::default();
        let mut view = StorefrontView::new();
        view.handle_key(KeyCode::Char('/'), &catalog);
        for c in "watch".chars() {
            view.handle_key(KeyCode::Char(c), &catalog);
        }
        view.handle_key(KeyCode::Enter, &catalog);
        assert!(!view.searching);
        assert_eq!(view.state.query(), "watch");
        match view.handle_key(KeyCode::Enter, &catalog) {
            Navigate::Checkout(params) => assert_eq!(params.name, "Apple Watch Ultra"),
            other => panic!("expected checkout, got {other:?}"),
        }
    }

    #[test]
    fn slash_ignored_off_products_tab() {
        let catalog = Catalog::default();
        let mut view = StorefrontView::new();
        view.handle_key(KeyCode::Char('1'), &catalog);
        assert_eq!(view.state.tab(), Tab::Profile);
        view.handle_key(KeyCode::Char('/'), &catalog);
        assert!(!view.searching);
    }

    #[test]
    fn letters_in_normal_mode_do_not_search() {
        let catalog = Catalog::default();
        let mut view = StorefrontView::new();
        view.handle_key(KeyCode::Char('x'), &catalog);
        assert_eq!(view.state.query(), "");
    }

    #[test]
    fn quit_keys() {
        let catalog = Catalog::default();
        let mut view = StorefrontView::new();
        assert_eq!(view.handle_key(KeyCode::Char('q'), &catalog), Navigate::Quit);
    }

    #[test]
    fn profile_toggle_via_keys() {
        let catalog = Catalog::default();
        let mut view = StorefrontView::new();
        view.handle_key(KeyCode::BackTab, &catalog);
        view.handle_key(KeyCode::Char('e'), &catalog);
        assert!(view.state.editing_bio());
    }
}
