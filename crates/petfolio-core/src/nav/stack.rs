//! Navigation stack.

use serde::Serialize;

use super::Screen;

/// Ordered history of screens; the last entry is the one displayed.
///
/// Never empty: `pop` stops at the root entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavStack {
    entries: Vec<Screen>,
}

impl NavStack {
    /// Start a stack with a single root screen.
    pub fn new(root: Screen) -> Self {
        Self {
            entries: vec![root],
        }
    }

    /// Show `screen` on top of the current one.
    pub fn push(&mut self, screen: Screen) {
        self.entries.push(screen);
    }

    /// Go back one screen. Returns the removed screen, or `None` at the root.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Swap the current screen for `screen`, returning the one replaced.
    pub fn replace(&mut self, screen: Screen) -> Screen {
        let top = self.entries.len() - 1;
        std::mem::replace(&mut self.entries[top], screen)
    }

    /// Collapse the history to a single screen.
    pub fn reset(&mut self, root: Screen) {
        self.entries.clear();
        self.entries.push(root);
    }

    pub fn current(&self) -> Screen {
        self.entries[self.entries.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn contains(&self, screen: Screen) -> bool {
        self.entries.contains(&screen)
    }

    /// Root first.
    pub fn entries(&self) -> &[Screen] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_pop_twice_returns_to_root() {
        let mut stack = NavStack::new(Screen::Pets);
        stack.push(Screen::Dashboard);
        stack.push(Screen::MedicalRecords);
        stack.push(Screen::VaccineDetails);

        stack.pop();
        stack.pop();
        assert_eq!(stack.current(), Screen::Dashboard);
        stack.pop();
        assert_eq!(stack.current(), Screen::Pets);
    }

    #[test]
    fn test_pop_never_underflows() {
        let mut stack = NavStack::new(Screen::Pets);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Screen::Pets);
        assert!(!stack.can_go_back());
    }

    #[test]
    fn test_replace_top() {
        let mut stack = NavStack::new(Screen::Pets);
        stack.push(Screen::PetForm);

        assert_eq!(stack.replace(Screen::Dashboard), Screen::PetForm);
        assert_eq!(stack.entries(), &[Screen::Pets, Screen::Dashboard]);
        assert_eq!(stack.pop(), Some(Screen::Dashboard));
        assert_eq!(stack.current(), Screen::Pets);
    }

    #[test]
    fn test_replace_root() {
        let mut stack = NavStack::new(Screen::SignIn);
        stack.replace(Screen::Pets);
        assert_eq!(stack.entries(), &[Screen::Pets]);
    }

    #[test]
    fn test_reset() {
        let mut stack = NavStack::new(Screen::Pets);
        stack.push(Screen::Dashboard);
        stack.push(Screen::Documents);
        stack.reset(Screen::Pets);
        assert_eq!(stack.entries(), &[Screen::Pets]);
        assert!(!stack.contains(Screen::Documents));
    }
}
