/// Open/closed flags of the dialogs reachable from the portfolio pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalStore {
    investments_open: bool,
    transfer_open: bool,
    transactions_delete_open: bool,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The add-investment dialog.
    pub fn is_investments_open(&self) -> bool {
        self.investments_open
    }

    pub fn set_investments_open(&mut self, open: bool) {
        self.investments_open = open;
    }

    pub fn is_transfer_open(&self) -> bool {
        self.transfer_open
    }

    pub fn set_transfer_open(&mut self, open: bool) {
        self.transfer_open = open;
    }

    pub fn is_transactions_delete_open(&self) -> bool {
        self.transactions_delete_open
    }

    pub fn set_transactions_delete_open(&mut self, open: bool) {
        self.transactions_delete_open = open;
    }
}
