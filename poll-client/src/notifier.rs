use std::sync::{Arc, Weak};

use anchor_lang::prelude::Pubkey;
use log::debug;

use crate::{
    config::Commitment,
    error::Result,
    ledger::{fetch_account, AccountReader, AccountSubscriber},
    state::{AccountLayout, AccountSnapshot},
};

/// Re-decodes an account every time the ledger reports a change to it.
pub struct ChangeNotifier<L> {
    ledger: Arc<L>,
    commitment: Commitment,
}

impl<L> ChangeNotifier<L>
where
    L: AccountReader + AccountSubscriber + Send + Sync + 'static,
{
    pub fn new(ledger: Arc<L>, commitment: Commitment) -> Self {
        ChangeNotifier { ledger, commitment }
    }

    /// Calls `on_change` with a fresh snapshot of `address` after each change.
    ///
    /// Each snapshot supersedes the previous one. The subscription lasts as long as the
    /// ledger does; there is no unsubscribe.
    pub fn subscribe<T, F>(&self, address: Pubkey, on_change: F) -> Result<()>
    where
        T: AccountLayout + 'static,
        F: Fn(Result<AccountSnapshot<T>>) + Send + Sync + 'static,
    {
        // The ledger owns the callback, so hold it weakly to avoid a cycle.
        let ledger: Weak<L> = Arc::downgrade(&self.ledger);
        let commitment = self.commitment;
        debug!("subscribing to {} account {}", T::NAME, address);
        self.ledger.on_account_change(
            &address,
            Arc::new(move || {
                if let Some(ledger) = ledger.upgrade() {
                    on_change(fetch_account::<T, L>(&ledger, &address, commitment));
                }
            }),
        )
    }
}
