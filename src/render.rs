//! Workstation rendering: dashboard header, the three rigs, the message
//! console, and the Expanded Operations overlay.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions::*;
use crate::app::{shop_rows, App};
use crate::engine::store::format_merits;
use crate::engine::{curves, Store, ToolId, UpgradeId};
use crate::input::{is_narrow_layout, ClickState};
use crate::time::{secs_to_ticks, TICKS_PER_SEC};
use crate::tools::button::{ButtonPhase, LIGHT_COUNT};
use crate::tools::dial::DialPhase;
use crate::tools::lever::LeverPhase;
use crate::tools::LeverRig;
use crate::widgets::ClickableList;

/// Rig panel height including borders.
const RIG_PANEL_H: u16 = 9;

/// Lever track rows inside the panel.
const TRACK_ROWS: usize = 5;

/// Detent cells on the dial face, clockwise from the top, as (row, col)
/// inside an 11-column block. Index order matches the pointer sweep.
const DETENT_CELLS: [(usize, usize); 8] = [
    (0, 5),
    (1, 8),
    (2, 10),
    (3, 8),
    (4, 5),
    (3, 2),
    (2, 0),
    (1, 2),
];

pub fn render(app: &App, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let is_narrow = is_narrow_layout(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // rigs + console, or the shop overlay
            Constraint::Length(1), // help bar
        ])
        .split(area);

    render_header(app, f, chunks[0], click_state, is_narrow);
    if app.show_shop {
        render_shop(app, f, chunks[1], click_state, is_narrow);
    } else if is_narrow {
        render_controls_narrow(app, f, chunks[1], click_state);
    } else {
        render_controls_wide(app, f, chunks[1], click_state);
    }
    render_help(app, f, chunks[2], click_state);
}

fn render_header(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    is_narrow: bool,
) {
    let store = &app.store;

    let merits_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(
        format!("◈ {} Merits™", format_merits(store.merits())),
        merits_style,
    )];

    if store.shop_unlocked() {
        let ops_style = if app.show_shop {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        };
        let label = if is_narrow {
            format!("   [{}] Operations", 'O')
        } else {
            format!("   [{}] Expanded Operations", 'O')
        };
        spans.push(Span::styled(label, ops_style));
    }

    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let title = if is_narrow {
        " OBJET "
    } else {
        " OBJET SYSTEMS · EMPLOYEE CONSOLE "
    };

    let widget = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    // The dashboard row toggles the shop; row-wide target for reliability.
    if store.shop_unlocked() {
        let mut cs = click_state.borrow_mut();
        cs.add_row_target(area, area.y + 1, TOGGLE_SHOP);
    }
}

fn render_controls_wide(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(RIG_PANEL_H), Constraint::Min(3)])
        .split(area);

    let rig_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(chunks[0]);

    render_button_panel(app, f, rig_chunks[0], click_state);
    if app.store.tool_unlocked(ToolId::Lever) {
        render_lever_panel(app, f, rig_chunks[1], click_state);
    } else {
        render_locked_panel(f, rig_chunks[1], ToolId::Lever.label());
    }
    if app.store.tool_unlocked(ToolId::Dial) {
        render_dial_panel(app, f, rig_chunks[2], click_state);
    } else {
        render_locked_panel(f, rig_chunks[2], ToolId::Dial.label());
    }

    render_console(&app.store, f, chunks[1]);
}

fn render_controls_narrow(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    // Stack only the unlocked rigs; locked ones are announced by the
    // console when they arrive.
    let lever = app.store.tool_unlocked(ToolId::Lever);
    let dial = app.store.tool_unlocked(ToolId::Dial);

    let mut constraints = vec![Constraint::Length(RIG_PANEL_H)];
    if lever {
        constraints.push(Constraint::Length(RIG_PANEL_H));
    }
    if dial {
        constraints.push(Constraint::Length(RIG_PANEL_H));
    }
    constraints.push(Constraint::Min(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    render_button_panel(app, f, chunks[idx], click_state);
    idx += 1;
    if lever {
        render_lever_panel(app, f, chunks[idx], click_state);
        idx += 1;
    }
    if dial {
        render_dial_panel(app, f, chunks[idx], click_state);
        idx += 1;
    }
    render_console(&app.store, f, chunks[idx]);
}

/// `[K] LABEL` hint rendered inside a panel. The bracket key is a format
/// argument so the whole panel rect can carry the click target instead.
fn key_hint(key: char, label: &str) -> String {
    format!("[{}] {}", key, label)
}

fn render_button_panel(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rig = &app.rigs.button;
    let p = app.store.params(ToolId::Button);
    let hold_ticks = secs_to_ticks(p.action_duration);
    let cool_ticks = secs_to_ticks(p.cooldown_duration);

    let lit = rig.lights_lit(hold_ticks);
    let mut light_spans: Vec<Span> = Vec::new();
    for i in 0..LIGHT_COUNT {
        let (ch, style) = if i < lit {
            ("● ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            ("○ ", Style::default().fg(Color::DarkGray))
        };
        light_spans.push(Span::styled(ch, style));
    }

    let art_style = match rig.phase {
        ButtonPhase::Idle => Style::default().fg(Color::White),
        ButtonPhase::Charging => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ButtonPhase::Cooldown => Style::default().fg(Color::DarkGray),
    };

    let (status, status_style) = match rig.phase {
        ButtonPhase::Idle => ("READY".to_string(), Style::default().fg(Color::DarkGray)),
        ButtonPhase::Charging => {
            let pct = 100 * rig.phase_ticks / hold_ticks.max(1);
            (
                format!("WORKING {:>3}%", pct.min(100)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }
        ButtonPhase::Cooldown => {
            let left = cool_ticks.saturating_sub(rig.phase_ticks) as f64 / TICKS_PER_SEC as f64;
            (
                format!("RESTING {:.1}s", left),
                Style::default().fg(Color::Cyan),
            )
        }
    };

    let lines = vec![
        Line::from(light_spans),
        Line::from(Span::styled(
            format!("+{} per cycle", format_merits(p.yield_per_action)),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled("╭────────╮", art_style)),
        Line::from(Span::styled("│  PUSH  │", art_style)),
        Line::from(Span::styled("╰────────╯", art_style)),
        Line::from(Span::styled(status, status_style)),
        Line::from(Span::styled(
            key_hint('B', "HOLD TO WORK"),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let border = if rig.phase == ButtonPhase::Charging {
        Color::Yellow
    } else {
        Color::Green
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", ToolId::Button.label())),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, PRESS_BUTTON);
}

fn render_lever_panel(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rig = &app.rigs.lever;
    let p = app.store.params(ToolId::Lever);
    let travel = LeverRig::travel_ticks(&app.store);
    let position = rig.position(travel);
    let handle_row = (position * (TRACK_ROWS - 1) as f64).round() as usize;

    let handle_style = match rig.phase {
        LeverPhase::Idle => Style::default().fg(Color::White),
        LeverPhase::Pulling => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LeverPhase::Cooldown => Style::default().fg(Color::DarkGray),
    };

    let mut lines: Vec<Line> = Vec::new();
    for r in 0..TRACK_ROWS {
        if r == handle_row {
            lines.push(Line::from(Span::styled("──█──", handle_style)));
        } else {
            lines.push(Line::from(Span::styled(
                "  │  ",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let (status, status_style) = match rig.phase {
        LeverPhase::Idle => ("READY".to_string(), Style::default().fg(Color::DarkGray)),
        LeverPhase::Pulling => (
            format!("PULLING {:>3}%", (position * 100.0).round() as u32),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        LeverPhase::Cooldown => (
            format!("+{} DEPOSITED", format_merits(p.yield_per_action)),
            Style::default().fg(Color::Cyan),
        ),
    };
    lines.push(Line::from(Span::styled(status, status_style)));
    lines.push(Line::from(Span::styled(
        key_hint('L', "PULL"),
        Style::default().fg(Color::DarkGray),
    )));

    let border = if rig.phase == LeverPhase::Pulling {
        Color::Yellow
    } else {
        Color::Green
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", ToolId::Lever.label())),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, PULL_LEVER);
}

fn render_dial_panel(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rig = &app.rigs.dial;

    let mut lines: Vec<Line> = Vec::new();
    for r in 0..5 {
        let mut spans: Vec<Span> = Vec::new();
        for c in 0..11 {
            let detent = DETENT_CELLS.iter().position(|&cell| cell == (r, c));
            let (ch, style) = match detent {
                Some(d) if d as u8 == rig.pointer => (
                    "◉",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(d) if d as u8 == rig.target => (
                    "◎",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(_) => ("·", Style::default().fg(Color::DarkGray)),
                None if (r, c) == (2, 5) && rig.miss_flash > 0 => (
                    "✗",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                None => (" ", Style::default()),
            };
            spans.push(Span::styled(ch, style));
        }
        lines.push(Line::from(spans));
    }

    let (status, status_style) = match rig.phase {
        DialPhase::Sweeping if rig.miss_flash > 0 => (
            "MISSED".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        DialPhase::Sweeping => (
            "TRACKING".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        DialPhase::Cooldown => ("HOLDING".to_string(), Style::default().fg(Color::Cyan)),
    };
    lines.push(Line::from(Span::styled(status, status_style)));
    lines.push(Line::from(Span::styled(
        key_hint('D', "ALIGN"),
        Style::default().fg(Color::DarkGray),
    )));

    let border = if rig.miss_flash > 0 {
        Color::Red
    } else {
        Color::Green
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", ToolId::Dial.label())),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, ALIGN_DIAL);
}

fn render_locked_panel(f: &mut Frame, area: Rect, label: &str) {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("░░░░░░░░░░░░░░", dim)),
        Line::from(Span::styled("░ RESTRICTED ░", dim)),
        Line::from(Span::styled("░░░░░░░░░░░░░░", dim)),
        Line::from(""),
        Line::from(Span::styled("awaiting clearance", dim)),
    ];
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim)
                .title(format!(" {} ", label)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Message console. Wrapped, auto-scrolled so the newest entry is always
/// at the bottom edge.
fn render_console(store: &Store, f: &mut Frame, area: Rect) {
    let last = store.log().len().saturating_sub(1);

    let mut cl = ClickableList::new();
    for (i, entry) in store.log().iter().enumerate() {
        let style = if i == last {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push(Line::from(Span::styled(format!(" {}", entry), style)));
    }

    let inner_w = area.width.saturating_sub(2);
    let inner_h = area.height.saturating_sub(2);
    let scroll = cl.visual_height(inner_w).saturating_sub(inner_h);

    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" CONSOLE "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(widget, area);
}

fn render_shop(
    app: &App,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    is_narrow: bool,
) {
    let store = &app.store;
    let rows = shop_rows(store);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));

    let mut last_tool: Option<ToolId> = None;
    for (idx, &(tool, id)) in rows.iter().enumerate() {
        if last_tool != Some(tool) {
            if last_tool.is_some() {
                cl.push(Line::from(""));
            }
            cl.push(Line::from(Span::styled(
                format!(" ── {} ──", tool.label()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            last_tool = Some(tool);
        }

        let Some(st) = store.upgrade(tool, id) else {
            continue;
        };
        let key = (b'a' + idx as u8) as char;
        let line = shop_row_line(store, st, key, is_narrow);
        cl.push_clickable(line, BUY_UPGRADE_BASE + idx as u16);
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [{}] Return to your duties", 'X'),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        CLOSE_SHOP,
    );
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" Balance: {} Merits™", format_merits(store.merits())),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let inner_w = area.width.saturating_sub(2);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, inner_w);
    }

    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" EXPANDED OPERATIONS "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// One purchasable row: key, name, level, price, and what the next level
/// changes. Locked and maxed rows keep their key so indices stay aligned
/// with the click actions.
fn shop_row_line(
    store: &Store,
    st: &crate::engine::store::UpgradeState,
    key: char,
    is_narrow: bool,
) -> Line<'static> {
    let def = st.def;

    if !st.unlocked {
        return Line::from(vec![
            Span::styled(format!(" [{}] ", key), Style::default().fg(Color::DarkGray)),
            Span::styled(def.name.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(
                "  requires executive approval",
                Style::default().fg(Color::Red),
            ),
        ]);
    }

    if st.at_max() {
        let done = if def.id == UpgradeId::AutoPress {
            "  ▸ Enabled".to_string()
        } else {
            format!("  ▸ {}", effect_value(def.id, st.current_effect))
        };
        return Line::from(vec![
            Span::styled(format!(" [{}] ", key), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} Lv {}", def.name, st.level),
                Style::default().fg(Color::White),
            ),
            Span::styled("  MAX", Style::default().fg(Color::Green)),
            Span::styled(done, Style::default().fg(Color::DarkGray)),
        ]);
    }

    let afford = store.merits() >= st.current_cost;
    let key_style = if afford {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if afford {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let preview_style = if afford {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let next = curves::effect(def.effect_base, def.effect_step, st.level + 1, def.min_effect);
    let preview = if def.id == UpgradeId::AutoPress {
        "  ▸ Disabled→Enabled".to_string()
    } else {
        format!(
            "  ▸ {}→{}",
            effect_value(def.id, st.current_effect),
            effect_value(def.id, next)
        )
    };

    let mut spans = vec![
        Span::styled(format!(" [{}] ", key), key_style),
        Span::styled(format!("{} Lv {}", def.name, st.level), text_style),
        Span::styled(
            format!("  ({} Merits™)", format_merits(st.current_cost)),
            text_style,
        ),
        Span::styled(preview, preview_style),
    ];
    if !is_narrow {
        spans.push(Span::styled(
            format!("  {}", def.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Format an effect value with the unit of the role it drives.
fn effect_value(id: UpgradeId, value: f64) -> String {
    match id {
        UpgradeId::Yield => format!("+{}/cycle", format_merits(value)),
        UpgradeId::HoldTime | UpgradeId::Cooldown => format!("{:.2}s", value),
        UpgradeId::DragSpeed => format!("×{:.2}", value),
        UpgradeId::AutoPress => format!("{}", value),
    }
}

/// Append a help-bar hint and register a precise click rect for it when it
/// carries an action.
fn push_hint(
    spans: &mut Vec<Span<'static>>,
    cs: &mut ClickState,
    col: &mut u16,
    row_y: u16,
    text: &'static str,
    style: Style,
    action: Option<u16>,
) {
    let w = text.chars().count() as u16;
    if let Some(id) = action {
        cs.add_click_target(Rect::new(*col, row_y, w, 1), id);
    }
    *col += w;
    spans.push(Span::styled(text, style));
}

fn render_help(app: &App, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let store = &app.store;
    let active = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span> = Vec::new();
    let mut col = area.x;
    let mut cs = click_state.borrow_mut();

    if app.show_shop {
        push_hint(
            &mut spans,
            &mut cs,
            &mut col,
            area.y,
            " [X] Close ",
            active,
            Some(CLOSE_SHOP),
        );
        push_hint(
            &mut spans,
            &mut cs,
            &mut col,
            area.y,
            " [A-L] Purchase ",
            dim,
            None,
        );
    } else {
        push_hint(
            &mut spans,
            &mut cs,
            &mut col,
            area.y,
            " [B] Hold ",
            active,
            Some(PRESS_BUTTON),
        );
        if store.tool_unlocked(ToolId::Lever) {
            push_hint(
                &mut spans,
                &mut cs,
                &mut col,
                area.y,
                " [L] Pull ",
                active,
                Some(PULL_LEVER),
            );
        }
        if store.tool_unlocked(ToolId::Dial) {
            push_hint(
                &mut spans,
                &mut cs,
                &mut col,
                area.y,
                " [D] Align ",
                active,
                Some(ALIGN_DIAL),
            );
        }
        if store.shop_unlocked() {
            push_hint(
                &mut spans,
                &mut cs,
                &mut col,
                area.y,
                " [O] Operations ",
                active,
                Some(TOGGLE_SHOP),
            );
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StoreConfig;

    fn app_with(merits: f64) -> App {
        let mut app = App::new(
            StoreConfig {
                starting_merits: merits,
                shop_unlocked: false,
            },
            7,
        );
        app.store.add_currency(0.0);
        app
    }

    #[test]
    fn detent_cells_cover_every_detent_once() {
        assert_eq!(DETENT_CELLS.len(), crate::tools::dial::DETENTS as usize);
        for (i, a) in DETENT_CELLS.iter().enumerate() {
            for b in DETENT_CELLS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn effect_values_carry_their_units() {
        assert_eq!(effect_value(UpgradeId::Yield, 2.0), "+2/cycle");
        assert_eq!(effect_value(UpgradeId::HoldTime, 4.5), "4.50s");
        assert_eq!(effect_value(UpgradeId::DragSpeed, 2.0), "×2.00");
    }

    #[test]
    fn shop_row_states_render_distinctly() {
        // 100 Merits: below the automation clearance, so AutoPress stays locked.
        let app = app_with(100.0);
        let store = &app.store;

        // Affordable row shows a price and a preview arrow.
        let st = store.upgrade(ToolId::Button, UpgradeId::Yield).unwrap();
        let line = shop_row_line(store, st, 'a', false);
        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("Output Optimization"));
        assert!(text.contains("(10 Merits™)"));
        assert!(text.contains("→"));

        // Locked automation row names the gate instead of a price.
        let st = store.upgrade(ToolId::Button, UpgradeId::AutoPress).unwrap();
        let line = shop_row_line(store, st, 'd', false);
        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("requires executive approval"));
        assert!(!text.contains("Merits™"));
    }

    #[test]
    fn maxed_row_shows_final_value() {
        let mut app = app_with(250.0);
        // Lever yield caps at level 5.
        for _ in 0..5 {
            assert!(app.store.purchase_upgrade(ToolId::Lever, UpgradeId::Yield));
        }
        let st = app.store.upgrade(ToolId::Lever, UpgradeId::Yield).unwrap();
        assert!(st.at_max());
        let line = shop_row_line(&app.store, st, 'e', false);
        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("MAX"));
        assert!(text.contains("+6/cycle"));
    }

    #[test]
    fn key_hints_defer_to_panel_targets() {
        assert_eq!(key_hint('B', "HOLD TO WORK"), "[B] HOLD TO WORK");
    }

    #[test]
    fn push_hint_registers_sequential_rects() {
        let mut cs = ClickState::new();
        let mut spans = Vec::new();
        let mut col = 0u16;
        push_hint(&mut spans, &mut cs, &mut col, 5, " [B] Hold ", Style::default(), Some(PRESS_BUTTON));
        push_hint(&mut spans, &mut cs, &mut col, 5, " [O] Ops ", Style::default(), Some(TOGGLE_SHOP));

        assert_eq!(cs.hit_test(2, 5), Some(PRESS_BUTTON));
        assert_eq!(cs.hit_test(12, 5), Some(TOGGLE_SHOP));
        assert_eq!(cs.hit_test(2, 6), None);
        assert_eq!(col, 19);
    }
}
