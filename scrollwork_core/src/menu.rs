// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile navigation menu.
//!
//! The hamburger menu used to be "whatever classes happen to be on the
//! element"; here it is an explicit two-state machine with one transition
//! function. The web layer feeds it [`MenuEvent`]s and applies the returned
//! [`MenuEffects`] verbatim — open/closed classes on the toggle and the menu,
//! a body scroll lock while open, and the `aria-expanded` mirror.
//!
//! Closing by any path (link click, outside click, toggle) releases the body
//! scroll lock.

/// Menu state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Menu hidden; page scrolls normally.
    #[default]
    Closed,
    /// Menu overlay shown; body scroll locked.
    Open,
}

/// Something the user did to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The hamburger was clicked, or activated with Enter/Space.
    ToggleActivated,
    /// A navigation link inside the menu was clicked.
    LinkActivated,
    /// A click landed outside the nav container while the menu was open.
    OutsidePressed,
    /// Escape (or an equivalent dismiss gesture) was pressed.
    DismissRequested,
}

/// DOM changes the web layer must apply after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEffects {
    /// Whether the menu and toggle carry their `active` classes.
    pub open: bool,
    /// Whether `body` scrolling is locked (`overflow: hidden`).
    pub lock_body_scroll: bool,
    /// Value for the toggle's `aria-expanded` attribute.
    pub aria_expanded: bool,
}

/// The menu machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Menu {
    state: MenuState,
}

impl Menu {
    /// Creates a closed menu.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    /// Applies one event. Returns the effects to mirror into the DOM, or
    /// `None` when the event changes nothing (e.g. an outside click while
    /// already closed).
    pub fn handle(&mut self, event: MenuEvent) -> Option<MenuEffects> {
        let next = match (self.state, event) {
            (MenuState::Closed, MenuEvent::ToggleActivated) => MenuState::Open,
            (MenuState::Open, _) => MenuState::Closed,
            (MenuState::Closed, _) => return None,
        };
        self.state = next;
        let open = next == MenuState::Open;
        Some(MenuEffects {
            open,
            lock_body_scroll: open,
            aria_expanded: open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_and_closes() {
        let mut menu = Menu::new();
        let fx = menu.handle(MenuEvent::ToggleActivated).unwrap();
        assert!(fx.open && fx.lock_body_scroll && fx.aria_expanded);
        assert_eq!(menu.state(), MenuState::Open);

        let fx = menu.handle(MenuEvent::ToggleActivated).unwrap();
        assert!(!fx.open && !fx.lock_body_scroll && !fx.aria_expanded);
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn link_click_closes_and_releases_scroll() {
        let mut menu = Menu::new();
        menu.handle(MenuEvent::ToggleActivated);
        let fx = menu.handle(MenuEvent::LinkActivated).unwrap();
        assert!(!fx.open);
        assert!(!fx.lock_body_scroll, "body scroll restored on close");
    }

    #[test]
    fn outside_click_closes_only_when_open() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(MenuEvent::OutsidePressed), None);

        menu.handle(MenuEvent::ToggleActivated);
        let fx = menu.handle(MenuEvent::OutsidePressed).unwrap();
        assert!(!fx.open && !fx.lock_body_scroll);
    }

    #[test]
    fn link_click_while_closed_is_inert() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(MenuEvent::LinkActivated), None);
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn escape_dismisses_an_open_menu() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(MenuEvent::DismissRequested), None);

        menu.handle(MenuEvent::ToggleActivated);
        let fx = menu.handle(MenuEvent::DismissRequested).unwrap();
        assert!(!fx.open && !fx.lock_body_scroll);
    }
}
