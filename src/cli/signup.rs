use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::input::TextInput;
use crate::state::signup::{Field, SignupEvent, SignupState, Step, ValidationPolicy, TOTAL_STEPS};
use crate::state::Navigate;
use crate::tui::{self, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const LABEL_WIDTH: u16 = 20;

/// Two-step registration wizard.
pub struct SignupView {
    state: SignupState,
    step: Step,
    inputs: Vec<(Field, TextInput)>,
    /// Index into `inputs`; `inputs.len()` is the submit button.
    active: usize,
}

impl SignupView {
    pub fn new(policy: ValidationPolicy) -> Self {
        let state = SignupState::new(policy);
        let step = state.step();
        let mut view = Self {
            state,
            step,
            inputs: Vec::new(),
            active: 0,
        };
        view.reset_inputs();
        view
    }

    fn reset_inputs(&mut self) {
        self.inputs = self
            .state
            .fields()
            .iter()
            .map(|f| {
                let input = if f.is_secret() {
                    TextInput::masked()
                } else {
                    TextInput::default()
                };
                (*f, input)
            })
            .collect();
        self.active = 0;
    }

    fn on_button(&self) -> bool {
        self.active == self.inputs.len()
    }

    fn move_to(&mut self, idx: usize) {
        self.active = idx.min(self.inputs.len());
        if let Some((_, input)) = self.inputs.get_mut(self.active) {
            input.move_to_end();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Navigate {
        if self.state.dialog().is_some() {
            return match code {
                KeyCode::Enter | KeyCode::Esc => self.state.apply(SignupEvent::Acknowledge),
                _ => Navigate::Stay,
            };
        }

        let nav = match code {
            KeyCode::Esc => self.state.apply(SignupEvent::Skip),
            KeyCode::Up | KeyCode::BackTab => {
                self.move_to(self.active.saturating_sub(1));
                Navigate::Stay
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_to(self.active + 1);
                Navigate::Stay
            }
            KeyCode::Enter if self.on_button() => self.state.apply(SignupEvent::Advance),
            KeyCode::Enter => {
                self.move_to(self.active + 1);
                Navigate::Stay
            }
            other => {
                if let Some((field, input)) = self.inputs.get_mut(self.active) {
                    if input.handle_key(other) {
                        let value = input.value().to_string();
                        return self.state.apply(SignupEvent::Input(*field, value));
                    }
                }
                Navigate::Stay
            }
        };

        if self.state.step() != self.step {
            self.step = self.state.step();
            self.reset_inputs();
        }
        nav
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let field_rows = self.inputs.len() as u16 * 2;
        let placeholder_rows = if self.step == Step::Security { 4 } else { 0 };
        let [_top, progress_area, title_area, _gap1, form_area, placeholder_area, error_area, _gap2, button_area, hints_area, _bottom] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(field_rows),
                Constraint::Length(placeholder_rows),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(tui::progress_line(self.step.number(), TOTAL_STEPS)),
            progress_area,
        );

        let title = match self.step {
            Step::Bio => vec![
                Line::from(Span::styled("Welcome To EasyPay!", HEADER_STYLE)),
                Line::from("Please provide your bio information."),
            ],
            Step::Security => vec![Line::from(Span::styled("Security Information", HEADER_STYLE))],
        };
        frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

        let form = centered_column(area, form_area);
        let rows = Layout::vertical(vec![Constraint::Length(1); self.inputs.len() * 2]).split(form);
        for (i, (field, input)) in self.inputs.iter().enumerate() {
            let focused = self.active == i;
            self.draw_field(frame, rows[i * 2], field.label(), &input.display(focused), focused, false);
            if let Some(msg) = self.state.errors().get(field.key()) {
                frame.render_widget(
                    Paragraph::new(Span::styled(format!("{:w$}{msg}", "", w = LABEL_WIDTH as usize), ERROR_STYLE)),
                    rows[i * 2 + 1],
                );
            }
        }

        if self.step == Step::Security {
            let placeholders = centered_column(area, placeholder_area);
            let [fp_row, _, img_row, _] = Layout::vertical([Constraint::Length(1); 4]).areas(placeholders);
            let security = self.state.security();
            let fingerprint = if security.fingerprint.is_empty() {
                "Fingerprint captured"
            } else {
                security.fingerprint.as_str()
            };
            let image = if security.image.is_empty() { "Image captured" } else { security.image.as_str() };
            self.draw_field(frame, fp_row, "Fingerprint Data", fingerprint, false, true);
            self.draw_field(frame, img_row, "Image Capture", image, false, true);
        }

        if let Some(msg) = self.state.general_error() {
            frame.render_widget(
                Paragraph::new(Span::styled(msg, ERROR_STYLE)).alignment(Alignment::Center),
                error_area,
            );
        }

        let label = match (self.state.is_loading(), self.step) {
            (true, _) => "[ Please wait... ]",
            (false, Step::Bio) => "[ Next ]",
            (false, Step::Security) => "[ Submit ]",
        };
        let btn_style = if self.on_button() {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, btn_style)).alignment(Alignment::Center),
            button_area,
        );
        frame.render_widget(
            Paragraph::new(" Enter=next  Up/Down=move  Esc=skip")
                .style(FOOTER_STYLE)
                .alignment(Alignment::Center),
            hints_area,
        );

        if let Some(dialog) = self.state.dialog() {
            tui::render_dialog(frame, dialog);
        }
    }

    fn draw_field(&self, frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool, disabled: bool) {
        let [label_area, input_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(area);

        let label_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{label:<w$}", w = LABEL_WIDTH as usize), label_style)),
            label_area,
        );

        let style = if focused {
            SELECTED_STYLE
        } else if disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(Color::Gray)
        };
        let padded = format!("{value:<w$}", w = input_area.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, style)), input_area);
    }
}

fn centered_column(area: Rect, row: Rect) -> Rect {
    let width = 60u16.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect::new(x, row.y, width, row.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(view: &mut SignupView, s: &str) {
        for c in s.chars() {
            view.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_walks_fields_then_button() {
        let mut view = SignupView::new(ValidationPolicy::Advisory);
        for _ in 0..6 {
            assert!(!view.on_button());
            view.handle_key(KeyCode::Enter);
        }
        assert!(view.on_button());
        view.handle_key(KeyCode::Down);
        assert!(view.on_button());
    }

    #[test]
    fn typing_reaches_state() {
        let mut view = SignupView::new(ValidationPolicy::Advisory);
        type_str(&mut view, "Kofi");
        assert_eq!(view.state.bio().first_name, "Kofi");
        view.handle_key(KeyCode::Backspace);
        assert_eq!(view.state.bio().first_name, "Kof");
    }

    #[test]
    fn submit_on_button_moves_to_security_step_with_fresh_inputs() {
        let mut view = SignupView::new(ValidationPolicy::Advisory);
        type_str(&mut view, "Kofi");
        view.move_to(6);
        view.handle_key(KeyCode::Enter);
        assert_eq!(view.step, Step::Security);
        assert_eq!(view.inputs.len(), 2);
        assert_eq!(view.active, 0);
        assert!(view.inputs.iter().all(|(_, i)| i.value().is_empty()));
    }

    #[test]
    fn enforced_wizard_stays_put_with_errors() {
        let mut view = SignupView::new(ValidationPolicy::Enforce);
        view.move_to(6);
        view.handle_key(KeyCode::Enter);
        assert_eq!(view.step, Step::Bio);
        assert_eq!(view.state.errors().len(), 6);
    }

    #[test]
    fn full_registration_returns_to_catalog() {
        let mut view = SignupView::new(ValidationPolicy::Enforce);
        for value in ["Efua", "Asante", "GHA-1", "1990-03-15", "Ho", "efua@example.com"] {
            type_str(&mut view, value);
            view.handle_key(KeyCode::Enter);
        }
        assert_eq!(view.handle_key(KeyCode::Enter), Navigate::Stay);
        assert_eq!(view.step, Step::Security);

        type_str(&mut view, "efua");
        view.handle_key(KeyCode::Tab);
        type_str(&mut view, "correct horse");
        view.handle_key(KeyCode::Tab);
        view.handle_key(KeyCode::Enter);
        assert!(view.state.dialog().is_some());
        assert_eq!(view.handle_key(KeyCode::Enter), Navigate::Catalog);
    }

    #[test]
    fn esc_skips_to_catalog() {
        let mut view = SignupView::new(ValidationPolicy::Advisory);
        assert_eq!(view.handle_key(KeyCode::Esc), Navigate::Catalog);
    }
}
