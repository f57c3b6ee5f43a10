pub mod currency;
pub mod modal;
pub mod portfolio;

use crate::errors::CoreError;
use crate::models::settings::Settings;

use currency::CurrencyStore;
use modal::ModalStore;
use portfolio::PortfolioStore;

/// The shared UI stores the transactions page reads from and writes to.
///
/// Passed into the page controller explicitly instead of living in globals,
/// so the controller can be driven from tests without any runtime.
#[derive(Debug, Clone, Default)]
pub struct Stores {
    pub portfolio: PortfolioStore,
    pub currency: CurrencyStore,
    pub modal: ModalStore,
}

impl Stores {
    pub fn new(portfolio: PortfolioStore, currency: CurrencyStore, modal: ModalStore) -> Self {
        Self {
            portfolio,
            currency,
            modal,
        }
    }

    /// Stores seeded from settings: no portfolio selected, the configured
    /// preferred currency, all dialogs closed.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Ok(Self {
            portfolio: PortfolioStore::default(),
            currency: CurrencyStore::new(&settings.preferred_currency)?,
            modal: ModalStore::new(),
        })
    }
}
