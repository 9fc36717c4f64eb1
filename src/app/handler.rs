//! Input handling: maps key and mouse events to page operations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::scroller::ScrollOutcome;
use crate::core::viewport::Viewport;
use crate::ui::layout::AppLayout;
use crate::ui::nav_bar;

use super::document::ROW_PX;
use super::state::{AppState, TerminalPage};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.cancel_scroll();
        state.should_quit = true;
        return;
    }

    // Digits jump straight to a section (1-based).
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let idx = c as usize - '1' as usize;
            navigate_to_index(state, idx);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let step = state.config.scroll_step_rows as f64 * ROW_PX;
    let page = page_height(state);

    match action {
        Action::ScrollUp => scroll_by(state, -step),
        Action::ScrollDown => scroll_by(state, step),
        Action::PageUp => scroll_by(state, -page),
        Action::PageDown => scroll_by(state, page),
        Action::PrevSection => report(state, |p| p.step_section(-1)),
        Action::NextSection => report(state, |p| p.step_section(1)),
        Action::Top => report(state, |p| p.scroll_to_top()),
        Action::Quit => {
            state.cancel_scroll();
            state.should_quit = true;
        }
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = state.config.scroll_step_rows as f64 * ROW_PX;

    match mouse.kind {
        MouseEventKind::ScrollUp => scroll_by(state, -step),
        MouseEventKind::ScrollDown => scroll_by(state, step),
        MouseEventKind::Down(MouseButton::Left) => {
            // No nav is drawn without room for a header.
            if state.page.viewport().header_height().is_none() {
                return;
            }
            let layout = AppLayout::from_area(state.terminal_area);
            let hit = nav_bar::label_at(
                state.site.title,
                state.page.sections(),
                layout.nav_area,
                mouse.column,
                mouse.row,
            );
            if let Some(idx) = hit {
                navigate_to_index(state, idx);
            }
        }
        _ => {}
    }
}

fn navigate_to_index(state: &mut AppState, idx: usize) {
    let Some(id) = state.page.sections().get(idx).map(|s| s.id.clone()) else {
        return;
    };
    report(state, |p| p.navigate(&id));
}

/// Manual scroll.  Takes over from any running animation.
fn scroll_by(state: &mut AppState, delta: f64) {
    state.cancel_scroll();
    state.page.scroll_by(delta);
}

/// Run a scroll request, keep its handle and put a short note in the
/// status bar when it did nothing.
fn report(state: &mut AppState, op: impl FnOnce(&mut TerminalPage) -> ScrollOutcome) {
    let outcome = op(&mut state.page);
    if let ScrollOutcome::Skipped = state.track(outcome) {
        state.status_message = Some("Nothing to scroll to".into());
    }
}

/// One screen of page content, minus the rows hidden under the nav.
fn page_height(state: &AppState) -> f64 {
    let layout = AppLayout::from_area(state.terminal_area);
    let rows = layout.page_area.height.saturating_sub(layout.nav_area.height).max(1);
    rows as f64 * ROW_PX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::document::Document;
    use crate::app::page::SITE;
    use crate::app::page_view::PageView;
    use crate::app::viewport::TerminalViewport;
    use crate::config::AppConfig;
    use crate::core::viewport::MonotonicClock;
    use ratatui::layout::Rect;

    fn state(rows: u16) -> AppState {
        let viewport = TerminalViewport::new(Document::layout(&SITE), rows - 1);
        let page = PageView::mount(viewport, MonotonicClock::new(), &SITE, Default::default())
            .expect("valid page");
        let mut state = AppState::new(page, &SITE, AppConfig::default());
        state.terminal_area = Rect::new(0, 0, 80, rows);
        state
    }

    fn press(state: &mut AppState, c: char) {
        handle_key(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn offset(state: &AppState) -> f64 {
        state.page.viewport().scroll_offset()
    }

    #[test]
    fn digit_starts_a_tracked_scroll() {
        let mut state = state(41);
        press(&mut state, '2');

        assert!(state.scroll.is_some());
        assert!(state.page.is_animating());
        // About starts at row 30; the nav covers 48 px above it.
        assert!(offset(&state) > 0.0 && offset(&state) < 30.0 * ROW_PX - 48.0);
    }

    #[test]
    fn digit_past_the_last_section_does_nothing() {
        let mut state = state(41);
        press(&mut state, '9');

        assert!(state.scroll.is_none());
        assert_eq!(offset(&state), 0.0);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn wheel_cancels_the_running_scroll() {
        let mut state = state(41);
        press(&mut state, '5');
        let handle = state.scroll.clone().expect("animating");

        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        assert!(handle.is_cancelled());
        assert!(state.scroll.is_none());
        assert!(!state.page.is_animating());
    }

    #[test]
    fn quitting_cancels_the_running_scroll() {
        let mut state = state(41);
        press(&mut state, '4');
        let handle = state.scroll.clone().expect("animating");

        press(&mut state, 'q');
        assert!(state.should_quit);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn clicking_a_nav_label_navigates() {
        let mut state = state(41);
        // "Voltline Energy" ends at column 15; " Home " spans 19..25 and
        // " About " 26..33.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 28, 1));

        assert!(state.scroll.is_some());
        assert!(offset(&state) > 0.0);
    }

    #[test]
    fn clicks_are_ignored_without_a_nav() {
        let mut state = state(4);
        assert!(state.page.viewport().header_height().is_none());

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 28, 1));
        assert!(state.scroll.is_none());
        assert_eq!(offset(&state), 0.0);
    }
}
