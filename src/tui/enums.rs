//! Enumerations for TUI state management.

/// Which screen is showing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Screen {
    Dashboard,
    Help,
}

/// The widget that receives keyboard input on the dashboard.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    Name,
    Priority,
    Expiry,
    List,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Name, Focus::Priority, Focus::Expiry, Focus::List];

    /// Next widget in tab order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    /// Previous widget in tab order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}
