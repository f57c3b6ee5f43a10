use serde::{Deserialize, Serialize};

/// The portfolio whose transactions the page lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPortfolio {
    pub portfolio_id: i64,
    #[serde(default)]
    pub portfolio_name: String,
}

impl SelectedPortfolio {
    pub fn new(portfolio_id: i64, portfolio_name: impl Into<String>) -> Self {
        Self {
            portfolio_id,
            portfolio_name: portfolio_name.into(),
        }
    }
}

/// Holds the currently selected portfolio, if any.
#[derive(Debug, Clone, Default)]
pub struct PortfolioStore {
    selected: Option<SelectedPortfolio>,
}

impl PortfolioStore {
    pub fn new(selected: Option<SelectedPortfolio>) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Option<&SelectedPortfolio> {
        self.selected.as_ref()
    }

    /// Replace the selection. Returns `true` if it actually changed.
    pub fn set_selected(&mut self, selected: Option<SelectedPortfolio>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        true
    }
}
