mod actions;
mod app;
mod engine;
mod input;
mod render;
mod time;
mod tools;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use app::App;
use engine::{StoreConfig, StoreEvent};
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::{GameTime, TICKS_PER_SEC};

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Wall-clock milliseconds for the frame loop.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Starting state overrides from the URL query string, for tuning sessions:
/// `?merits=500&shop=1` opens mid-game.
fn debug_config() -> StoreConfig {
    let mut cfg = StoreConfig::default();
    let Some(window) = web_sys::window() else {
        return cfg;
    };
    let Ok(search) = window.location().search() else {
        return cfg;
    };
    if search.is_empty() {
        return cfg;
    }
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return cfg;
    };
    if let Some(m) = params.get("merits") {
        if let Ok(v) = m.parse::<f64>() {
            cfg.starting_merits = v;
        }
    }
    if params.get("shop").as_deref() == Some("1") {
        cfg.shop_unlocked = true;
    }
    cfg
}

fn audio(src: &str) -> Option<web_sys::HtmlAudioElement> {
    web_sys::HtmlAudioElement::new_with_src(src).ok()
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(App::new(
        debug_config(),
        js_sys::Date::now() as u32,
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Sound collaborator: a chime for console messages, a blip for earnings.
    // Autoplay can be blocked until the first interaction, so play() errors
    // are dropped.
    {
        let console_chime = audio("chime.ogg");
        let earn_blip = audio("blip.ogg");
        app.borrow_mut().store.subscribe(move |_snapshot, events| {
            let message = events
                .iter()
                .any(|e| matches!(e, StoreEvent::MessageLogged));
            let earned = events
                .iter()
                .any(|e| matches!(e, StoreEvent::CurrencyAdded { amount } if *amount > 0.0));

            let element = if message {
                console_chime.as_ref()
            } else if earned {
                earn_blip.as_ref()
            } else {
                None
            };
            if let Some(el) = element {
                el.set_current_time(0.0);
                let _ = el.play();
            }
        });
    }

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let cell = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs);
            let action = cell.and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if let Some(action) = action {
                app.borrow_mut().handle_input(&InputEvent::Click(action));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| match key_event.code {
            KeyCode::Char(c) => {
                app.borrow_mut().handle_input(&InputEvent::Key(c));
            }
            KeyCode::Esc => {
                app.borrow_mut()
                    .handle_input(&InputEvent::Click(actions::CLOSE_SHOP));
            }
            _ => {}
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let mut game_time = GameTime::new(TICKS_PER_SEC);
        move |f| {
            let ticks = game_time.update(now_ms());
            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let mut app = app.borrow_mut();
            app.tick(ticks);
            render::render(&app, f, size, &click_state);
        }
    });

    Ok(())
}
