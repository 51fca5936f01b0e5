//! Per-recipient released total
//!
//! Each `(mint, recipient)` pair gets its own account, created on the
//! recipient's first condense. An account that does not exist yet reads
//! as zero released.
//!
//! The stored value is cumulative: a condense proving a total of `T`
//! releases `T - total_withdrawn` and then sets `total_withdrawn = T`.

use anchor_lang::prelude::*;

use crate::error::CondenserError;

/// Released-total account.
///
/// PDA Seeds: `[b"withdrawn", mint.key().as_ref(), recipient.as_ref()]`
#[account]
#[derive(Default)]
pub struct WithdrawnTracker {
    /// Mint this total is denominated in
    pub mint: Pubkey,

    /// Recipient whose entitlement is tracked
    pub recipient: Pubkey,

    /// Cumulative amount released so far
    pub total_withdrawn: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl WithdrawnTracker {
    /// Seed prefix for PDA derivation
    pub const SEED_PREFIX: &'static [u8] = b"withdrawn";

    /// Account space
    pub const LEN: usize = 8  // discriminator
        + 32                  // mint
        + 32                  // recipient
        + 8                   // total_withdrawn
        + 1;                  // bump

    /// Derive the PDA address for a recipient's tracker
    pub fn find_pda(program_id: &Pubkey, mint: &Pubkey, recipient: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED_PREFIX, mint.as_ref(), recipient.as_ref()],
            program_id,
        )
    }

    /// Bind a freshly created account to `(mint, recipient)`, or check an
    /// existing one is bound to the same pair.
    pub fn bind(&mut self, mint: Pubkey, recipient: Pubkey, bump: u8) -> Result<()> {
        if self.mint == Pubkey::default() && self.recipient == Pubkey::default() {
            self.mint = mint;
            self.recipient = recipient;
            self.total_withdrawn = 0;
            self.bump = bump;
            return Ok(());
        }

        require_keys_eq!(self.mint, mint, CondenserError::TrackerMismatch);
        require_keys_eq!(self.recipient, recipient, CondenserError::TrackerMismatch);
        Ok(())
    }

    /// Amount already released to this recipient.
    pub fn total(&self) -> u64 {
        self.total_withdrawn
    }

    /// Record a release of `delta` and return the new total.
    pub fn increase(&mut self, delta: u64) -> Result<u64> {
        self.total_withdrawn = self
            .total_withdrawn
            .checked_add(delta)
            .ok_or(error!(CondenserError::ArithmeticOverflow))?;
        Ok(self.total_withdrawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tracker_reads_zero() {
        let mut tracker = WithdrawnTracker::default();
        tracker.bind(Pubkey::new_unique(), Pubkey::new_unique(), 1).unwrap();
        assert_eq!(tracker.total(), 0);
    }

    #[test]
    fn test_increase_accumulates() {
        let mut tracker = WithdrawnTracker::default();
        assert_eq!(tracker.increase(400).unwrap(), 400);
        assert_eq!(tracker.increase(600).unwrap(), 1000);
        assert_eq!(tracker.total(), 1000);
    }

    #[test]
    fn test_increase_overflow() {
        let mut tracker = WithdrawnTracker {
            total_withdrawn: u64::MAX,
            ..Default::default()
        };
        assert!(tracker.increase(1).is_err());
        assert_eq!(tracker.total(), u64::MAX);
    }

    #[test]
    fn test_rebind_same_pair() {
        let mint = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let mut tracker = WithdrawnTracker::default();

        tracker.bind(mint, recipient, 3).unwrap();
        tracker.increase(10).unwrap();
        tracker.bind(mint, recipient, 3).unwrap();

        assert_eq!(tracker.total(), 10);
        assert!(tracker.bind(mint, Pubkey::new_unique(), 3).is_err());
    }

    #[test]
    fn test_pda_is_per_recipient() {
        let mint = Pubkey::new_unique();
        let (a, _) = WithdrawnTracker::find_pda(&crate::ID, &mint, &Pubkey::new_unique());
        let (b, _) = WithdrawnTracker::find_pda(&crate::ID, &mint, &Pubkey::new_unique());
        assert_ne!(a, b);
    }
}
