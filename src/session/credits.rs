//! Session-scoped execution quota.

/// Bounds how many execution attempts one editor instance may initiate.
///
/// The ledger is a transient in-memory counter, initialized to a fixed quota
/// when the editor session starts, never persisted, and never replenished:
/// refreshing the quota means discarding the ledger and starting a new
/// editor session. It is deliberately not a durable account balance.
///
/// A credit is consumed at intent-to-run, so a run that later fails or is
/// cancelled still spends its credit.
///
/// # Examples
///
/// ```
/// use stackweave::session::CreditLedger;
///
/// let mut ledger = CreditLedger::new(2);
/// assert!(ledger.try_consume());
/// assert!(ledger.try_consume());
/// assert!(!ledger.try_consume());
/// assert_eq!(ledger.remaining(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreditLedger {
    quota: u32,
    remaining: u32,
}

impl CreditLedger {
    /// The reference quota for a fresh editor session.
    pub const DEFAULT_QUOTA: u32 = 10;

    #[must_use]
    pub fn new(quota: u32) -> Self {
        Self {
            quota,
            remaining: quota,
        }
    }

    /// Credits left in this session. Never exceeds the quota, never goes
    /// negative.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The quota this ledger started with.
    #[must_use]
    pub fn quota(&self) -> u32 {
        self.quota
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one credit if any remain. Refuses at zero and stays at zero.
    #[must_use]
    pub fn try_consume(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for CreditLedger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUOTA)
    }
}
