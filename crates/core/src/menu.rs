//! Option menu model
//!
//! An ordered list of labelled choices with one highlighted entry. The view
//! draws it; input moves the highlight; confirming yields the payload of the
//! highlighted entry and cancelling yields nothing.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<T> {
    pub label: &'static str,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    title: &'static str,
    options: Vec<MenuOption<T>>,
    current: usize,
}

impl<T: Copy> Menu<T> {
    pub fn new(title: &'static str, options: Vec<MenuOption<T>>) -> Self {
        Self {
            title,
            options,
            current: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn options(&self) -> &[MenuOption<T>] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Highlight `index`, clamped into range.
    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.options.len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.select(self.current.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.current + 1);
    }

    /// Payload of the highlighted entry (`None` for an empty menu).
    pub fn confirm(&self) -> Option<T> {
        self.options.get(self.current).map(|o| o.value)
    }

    /// Close without choosing. Resets the highlight and yields nothing.
    pub fn cancel(&mut self) -> Option<T> {
        self.current = 0;
        None
    }

    /// Longest label, used by the view to size the box.
    pub fn widest_label(&self) -> usize {
        self.options
            .iter()
            .map(|o| o.label.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(0)
    }
}
