//! The ledger collaborator: account reads and change subscriptions.
//!
//! Transport, retries and confirmation live behind these traits; the codec only sees bytes.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use anchor_lang::prelude::Pubkey;
use log::{debug, trace};

use crate::{
    config::Commitment,
    error::{PollClientError, Result},
    state::{AccountLayout, AccountSnapshot},
};

/// Invoked after the data stored at a subscribed address changed. Carries no payload;
/// the receiver re-reads the account.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync + 'static>;

pub trait AccountReader {
    /// Raw account data, or `None` when nothing has been created at `address` yet.
    fn get_account_data(&self, address: &Pubkey, commitment: Commitment)
        -> Result<Option<Vec<u8>>>;
}

pub trait AccountSubscriber {
    /// Registers `callback` for every observed change of `address`, for the lifetime of the
    /// subscriber.
    fn on_account_change(&self, address: &Pubkey, callback: ChangeCallback) -> Result<()>;
}

/// Reads `address` and decodes it as `T`.
pub fn fetch_account<T, R>(
    reader: &R,
    address: &Pubkey,
    commitment: Commitment,
) -> Result<AccountSnapshot<T>>
where
    T: AccountLayout,
    R: AccountReader + ?Sized,
{
    let data = reader.get_account_data(address, commitment)?;
    if data.is_none() {
        debug!("{} account {} not created yet", T::NAME, address);
    }
    T::decode(data.as_deref()).map(AccountSnapshot::from_decoded)
}

/// An in-process ledger holding raw account data, for tests and local tooling.
///
/// Writes notify subscribers of the written address synchronously, on the writer's thread.
#[derive(Default)]
pub struct MemoryLedger {
    accounts: RwLock<HashMap<Pubkey, Vec<u8>>>,
    subscribers: Mutex<HashMap<Pubkey, Vec<ChangeCallback>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) -> Result<()> {
        self.accounts
            .write()
            .map_err(|_| poisoned())?
            .insert(address, data);
        self.notify(&address)
    }

    pub fn remove_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let removed = self
            .accounts
            .write()
            .map_err(|_| poisoned())?
            .remove(address);
        if removed.is_some() {
            self.notify(address)?;
        }
        Ok(removed)
    }

    pub fn subscriber_count(&self, address: &Pubkey) -> Result<usize> {
        Ok(self
            .subscribers
            .lock()
            .map_err(|_| poisoned())?
            .get(address)
            .map_or(0, Vec::len))
    }

    fn notify(&self, address: &Pubkey) -> Result<()> {
        // Clone the callbacks out so they can read the ledger without holding the lock.
        let callbacks = self
            .subscribers
            .lock()
            .map_err(|_| poisoned())?
            .get(address)
            .cloned()
            .unwrap_or_default();
        trace!("{} change callback(s) for {}", callbacks.len(), address);
        for callback in callbacks {
            callback();
        }
        Ok(())
    }
}

impl AccountReader for MemoryLedger {
    fn get_account_data(
        &self,
        address: &Pubkey,
        _commitment: Commitment,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self
            .accounts
            .read()
            .map_err(|_| poisoned())?
            .get(address)
            .cloned())
    }
}

impl AccountSubscriber for MemoryLedger {
    fn on_account_change(&self, address: &Pubkey, callback: ChangeCallback) -> Result<()> {
        self.subscribers
            .lock()
            .map_err(|_| poisoned())?
            .entry(*address)
            .or_default()
            .push(callback);
        Ok(())
    }
}

fn poisoned() -> PollClientError {
    PollClientError::Ledger("memory ledger lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::state::PollCount;

    #[test]
    fn test_fetch_absent_and_ready() {
        let ledger = MemoryLedger::new();
        let address = Pubkey::new_unique();
        assert_eq!(
            fetch_account::<PollCount, _>(&ledger, &address, Commitment::Confirmed),
            Ok(AccountSnapshot::NotCreated)
        );
        ledger.set_account(address, vec![1, 3, 250]).unwrap();
        assert_eq!(
            fetch_account::<PollCount, _>(&ledger, &address, Commitment::Confirmed)
                .unwrap()
                .ready()
                .map(|count| count.count),
            Some(3)
        );
    }

    #[test]
    fn test_fetch_malformed() {
        let ledger = MemoryLedger::new();
        let address = Pubkey::new_unique();
        ledger.set_account(address, vec![1]).unwrap();
        assert!(matches!(
            fetch_account::<PollCount, _>(&ledger, &address, Commitment::Confirmed),
            Err(PollClientError::MalformedAccount { .. })
        ));
    }

    #[test]
    fn test_writes_notify_subscribers() {
        let ledger = MemoryLedger::new();
        let watched = Pubkey::new_unique();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        ledger
            .on_account_change(
                &watched,
                Arc::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        ledger.set_account(watched, vec![0]).unwrap();
        ledger.set_account(Pubkey::new_unique(), vec![0]).unwrap();
        ledger.remove_account(&watched).unwrap();
        ledger.remove_account(&watched).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(ledger.subscriber_count(&watched), Ok(1));
    }

    #[test]
    fn test_poisoned_subscribers_reported() {
        let ledger = Arc::new(MemoryLedger::new());
        let holder = Arc::clone(&ledger);
        let joined = std::thread::spawn(move || {
            let _guard = holder.subscribers.lock().unwrap();
            panic!("poison the subscriber lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(matches!(
            ledger.subscriber_count(&Pubkey::new_unique()),
            Err(PollClientError::Ledger(_))
        ));
    }
}
