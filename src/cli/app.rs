use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::{debug, info};

use super::checkout::CheckoutView;
use super::signup::SignupView;
use super::storefront::StorefrontView;
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::state::checkout::CheckoutState;
use crate::state::signup::ValidationPolicy;
use crate::state::Navigate;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppOptions {
    pub catalog: Catalog,
    pub order_delay: Duration,
    pub policy: ValidationPolicy,
    pub start_with_signup: bool,
    /// Leave as soon as the wizard is done instead of opening the catalog.
    pub signup_only: bool,
}

enum Screen {
    Signup(SignupView),
    Storefront(StorefrontView),
    Checkout(CheckoutView),
}

struct App<C: Clock> {
    screen: Screen,
    options: AppOptions,
    clock: C,
}

impl<C: Clock> App<C> {
    fn new(options: AppOptions, clock: C) -> Self {
        let screen = if options.start_with_signup || options.signup_only {
            Screen::Signup(SignupView::new(options.policy))
        } else {
            Screen::Storefront(StorefrontView::new())
        };
        Self {
            screen,
            options,
            clock,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            Screen::Signup(view) => view.draw(frame),
            Screen::Storefront(view) => view.draw(frame, &self.options.catalog),
            Screen::Checkout(view) => view.draw(frame),
        }
    }

    fn tick(&mut self) {
        if let Screen::Checkout(view) = &mut self.screen {
            view.tick(self.clock.now());
        }
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let nav = match &mut self.screen {
            Screen::Signup(view) => view.handle_key(code),
            Screen::Storefront(view) => view.handle_key(code, &self.options.catalog),
            Screen::Checkout(view) => view.handle_key(code, self.clock.now()),
        };
        self.navigate(nav)
    }

    fn navigate(&mut self, nav: Navigate) -> bool {
        match nav {
            Navigate::Stay => false,
            Navigate::Quit => true,
            Navigate::Catalog => {
                if self.options.signup_only && matches!(self.screen, Screen::Signup(_)) {
                    return true;
                }
                debug!("navigate: catalog");
                self.screen = Screen::Storefront(StorefrontView::new());
                false
            }
            Navigate::Checkout(params) => {
                debug!(product = %params.name, "navigate: checkout");
                let state = CheckoutState::new(params, &self.options.catalog, self.options.order_delay);
                self.screen = Screen::Checkout(CheckoutView::new(state));
                false
            }
        }
    }
}

/// Run the interactive storefront until the user quits.
pub fn run(options: AppOptions) -> Result<()> {
    info!(
        products = options.catalog.products.len(),
        policy = ?options.policy,
        "starting storefront"
    );
    let mut app = App::new(options, SystemClock);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match event::poll(POLL_INTERVAL) {
            Err(e) => break Err(e.into()),
            Ok(false) => {}
            Ok(true) => match event::read() {
                Err(e) => break Err(e.into()),
                Ok(Event::Key(key)) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break Ok(());
                    }
                    if app.handle_key(key.code) {
                        break Ok(());
                    }
                }
                _ => {}
            },
        }

        app.tick();
    };

    drop(terminal);
    ratatui::restore();
    info!("storefront closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn options(start_with_signup: bool, signup_only: bool) -> AppOptions {
        AppOptions {
            catalog: Catalog::default(),
            order_delay: Duration::from_millis(1500),
            policy: ValidationPolicy::Advisory,
            start_with_signup,
            signup_only,
        }
    }

    #[test]
    fn buy_then_order_returns_to_storefront() {
        let mut app = App::new(options(false, false), ManualClock::new());
        assert!(matches!(app.screen, Screen::Storefront(_)));

        assert!(!app.handle_key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Checkout(_)));

        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        for _ in 0..5 {
            app.handle_key(KeyCode::Down);
        }
        app.handle_key(KeyCode::Enter);

        app.tick();
        app.clock.advance(Duration::from_millis(1500));
        app.tick();
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Storefront(_)));
    }

    #[test]
    fn signup_flows_into_storefront() {
        let mut app = App::new(options(true, false), ManualClock::new());
        assert!(matches!(app.screen, Screen::Signup(_)));
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(matches!(app.screen, Screen::Storefront(_)));
    }

    #[test]
    fn signup_only_exits_after_wizard() {
        let mut app = App::new(options(false, true), ManualClock::new());
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn quit_from_storefront() {
        let mut app = App::new(options(false, false), ManualClock::new());
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
