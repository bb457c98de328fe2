use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calculator::tier_amount;
use crate::state::checkout::{CheckoutEvent, CheckoutState};
use crate::state::Navigate;
use crate::tui::{self, amount_span, ACCENT_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Deposit,
    LoanFirm,
    Button,
}

pub struct CheckoutView {
    state: CheckoutState,
    focus: Focus,
    deposit_cursor: usize,
    firm_cursor: usize,
}

impl CheckoutView {
    pub fn new(state: CheckoutState) -> Self {
        Self {
            state,
            focus: Focus::Deposit,
            deposit_cursor: 0,
            firm_cursor: 0,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.state.apply(CheckoutEvent::Tick, now);
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Navigate {
        if self.state.dialog().is_some() {
            return match code {
                KeyCode::Enter | KeyCode::Esc => self.state.apply(CheckoutEvent::Acknowledge, now),
                _ => Navigate::Stay,
            };
        }

        let tiers = self.state.deposit_options().len();
        let firms = self.state.loan_firms().len();

        match code {
            // An order in flight always runs to its confirmation.
            KeyCode::Esc | KeyCode::Char('q') if self.state.is_loading() => {}
            KeyCode::Esc | KeyCode::Char('q') => return Navigate::Catalog,
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(opt) = self.state.deposit_options().get(idx) {
                    let value = opt.value;
                    self.deposit_cursor = idx;
                    self.state.apply(CheckoutEvent::SelectDeposit(value), now);
                }
            }
            KeyCode::Left if self.focus == Focus::Deposit => {
                self.deposit_cursor = self.deposit_cursor.saturating_sub(1);
            }
            KeyCode::Right if self.focus == Focus::Deposit => {
                self.deposit_cursor = (self.deposit_cursor + 1).min(tiers.saturating_sub(1));
            }
            KeyCode::Up => match self.focus {
                Focus::Deposit => {}
                Focus::LoanFirm if self.firm_cursor == 0 => self.focus = Focus::Deposit,
                Focus::LoanFirm => self.firm_cursor -= 1,
                Focus::Button => {
                    self.focus = if firms > 0 { Focus::LoanFirm } else { Focus::Deposit };
                }
            },
            KeyCode::Down | KeyCode::Tab => match self.focus {
                Focus::Deposit if firms > 0 => self.focus = Focus::LoanFirm,
                Focus::Deposit => self.focus = Focus::Button,
                Focus::LoanFirm if self.firm_cursor + 1 < firms => self.firm_cursor += 1,
                Focus::LoanFirm => self.focus = Focus::Button,
                Focus::Button => {}
            },
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Deposit => {
                    if let Some(opt) = self.state.deposit_options().get(self.deposit_cursor) {
                        let value = opt.value;
                        self.state.apply(CheckoutEvent::SelectDeposit(value), now);
                    }
                }
                Focus::LoanFirm => {
                    if let Some(firm) = self.state.loan_firms().get(self.firm_cursor) {
                        let id = firm.id;
                        self.state.apply(CheckoutEvent::SelectLoanFirm(id), now);
                    }
                }
                Focus::Button => {
                    // A disabled button still reports why it cannot proceed.
                    self.state.apply(CheckoutEvent::PlaceOrder, now);
                }
            },
            _ => {}
        }
        Navigate::Stay
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let firm_rows = self.state.loan_firms().len() as u16;
        let [demo_area, product_area, deposit_title, deposit_area, summary_area, firm_title, firm_area, button_area, hints_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(firm_rows),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(" Demo: Flexible Payment Options").style(FOOTER_STYLE),
            demo_area,
        );

        let params = &self.state.params;
        let (description, _) = tui::wrap_text(&params.description, area.width.saturating_sub(4) as usize);
        let mut product_lines = vec![Line::from(Span::styled(
            format!(" {}", params.name),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        product_lines.extend(description.lines().map(|l| Line::from(format!(" {l}"))));
        product_lines.push(Line::from(Span::styled(format!(" {}", params.price), ACCENT_STYLE)));
        product_lines.push(Line::from(Span::styled(format!(" {}", params.image), FOOTER_STYLE)));
        frame.render_widget(Paragraph::new(product_lines), product_area);

        frame.render_widget(
            Paragraph::new(" Select Initial Deposit").style(HEADER_STYLE),
            deposit_title,
        );
        let mut tier_spans = vec![Span::raw(" ")];
        let mut amount_spans = vec![Span::raw(" ")];
        for (i, opt) in self.state.deposit_options().iter().enumerate() {
            let chosen = self.state.selected_deposit() == Some(opt.value);
            let cursor = self.focus == Focus::Deposit && i == self.deposit_cursor;
            let style = match (chosen, cursor) {
                (_, true) => SELECTED_STYLE,
                (true, false) => ACCENT_STYLE.add_modifier(Modifier::BOLD),
                (false, false) => Style::default(),
            };
            let label = format!("[{:^5}]", opt.label);
            let cell_width = label.chars().count().max(16);
            tier_spans.push(Span::styled(format!("{label:<cell_width$}"), style));
            let amount = if chosen {
                crate::fmt::cedis(tier_amount(self.state.price(), opt.value))
            } else {
                String::new()
            };
            amount_spans.push(Span::styled(format!("{amount:<cell_width$}"), ACCENT_STYLE));
        }
        frame.render_widget(
            Paragraph::new(vec![Line::from(tier_spans), Line::from(amount_spans)]),
            deposit_area,
        );

        if self.state.selected_deposit().is_some() {
            let split = self.state.split();
            let summary = Paragraph::new(vec![
                Line::from(vec![Span::raw(" Initial Deposit:  "), amount_span(split.deposit)]),
                Line::from(vec![Span::raw(" Loan Amount:      "), amount_span(split.remaining)]),
            ])
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(FOOTER_STYLE));
            frame.render_widget(summary, summary_area);
        }

        frame.render_widget(Paragraph::new(" Choose Loan Firm").style(HEADER_STYLE), firm_title);
        let firm_lines: Vec<Line> = self
            .state
            .loan_firms()
            .iter()
            .enumerate()
            .map(|(i, firm)| {
                let chosen = self.state.selected_loan_firm() == Some(firm.id);
                let cursor = self.focus == Focus::LoanFirm && i == self.firm_cursor;
                let marker = if cursor { ">" } else { " " };
                let check = if chosen { "\u{2713}" } else { " " };
                let style = if cursor {
                    SELECTED_STYLE
                } else if chosen {
                    ACCENT_STYLE
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!(" {marker} {} {:<24} {:>12}  {check}", firm.logo, firm.name, firm.interest_rate),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(firm_lines), firm_area);

        let (label, style) = if self.state.is_loading() {
            ("[ Processing... ]", Style::default().fg(Color::DarkGray))
        } else if !self.state.can_place_order() {
            ("[ Place Order ]", Style::default().fg(Color::DarkGray))
        } else if self.focus == Focus::Button {
            ("[ Place Order ]", Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        } else {
            ("[ Place Order ]", Style::default().add_modifier(Modifier::BOLD))
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
            button_area,
        );
        frame.render_widget(
            Paragraph::new(" 1-5/\u{2190}\u{2192}:deposit  \u{2191}/\u{2193}:move  Enter:select  Esc:back")
                .style(FOOTER_STYLE),
            hints_area,
        );

        if let Some(dialog) = self.state.dialog() {
            tui::render_dialog(frame, &dialog);
        }
    }
}
