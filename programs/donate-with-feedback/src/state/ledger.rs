use anchor_lang::prelude::*;

use super::Donation;

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct FeedbackLedger {
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub token_program: Pubkey, // Program that owns the mint and vault
    pub bump: u8,
    pub max_donation: u64,
    pub total_donation: u64,
    pub count: u64, // Number of donations in the log
}

impl Space for FeedbackLedger {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // creator: Pubkey
        + 32    // mint: Pubkey
        + 32    // token_program: Pubkey
        + 1     // bump: u8
        + 8     // max_donation: u64
        + 8     // total_donation: u64
        + 8;    // count: u64
}

impl FeedbackLedger {
    pub fn new(creator: Pubkey, mint: Pubkey, token_program: Pubkey, bump: u8) -> Self {
        Self {
            creator,
            mint,
            token_program,
            bump,
            max_donation: 0,
            total_donation: 0,
            count: 0,
        }
    }

    /// Folds a settled donation into the aggregates and returns its index in
    /// the log.
    pub fn record(&mut self, donation: &Donation) -> Result<u64> {
        let nr = self.count;

        if donation.amount > self.max_donation {
            self.max_donation = donation.amount;
        }
        self.total_donation = self
            .total_donation
            .checked_add(donation.amount)
            .ok_or(LedgerError::MathOverflow)?;
        self.count = self.count.checked_add(1).ok_or(LedgerError::MathOverflow)?;

        Ok(nr)
    }

    /// Settles `donation` and appends it to the log. Returns the entry index
    /// and the refunded amount. A failed refund leaves the aggregates as
    /// they were.
    pub fn accept<F>(&mut self, donation: &mut Donation, refund: F) -> Result<(u64, u64)>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        let refunded = donation.settle(refund)?;
        let nr = self.record(donation)?;
        Ok((nr, refunded))
    }

    pub fn contains(&self, nr: u64) -> bool {
        nr < self.count
    }

    pub fn info(&self) -> DonationInfo {
        DonationInfo {
            max_donation: self.max_donation,
            total_donation: self.total_donation,
            count: self.count,
        }
    }
}

/// How much a withdrawal actually moves. Zero or oversized requests drain
/// the whole balance; `None` means there is nothing to move.
pub fn withdrawal_amount(requested: Option<u64>, balance: u64) -> Option<u64> {
    let amount = match requested.unwrap_or(0) {
        0 => balance,
        amount if amount > balance => balance,
        amount => amount,
    };
    (amount > 0).then_some(amount)
}

/// Result of `view_donation_info`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonationInfo {
    pub max_donation: u64,
    pub total_donation: u64,
    pub count: u64,
}

#[event]
pub struct LedgerInitialized {
    pub ledger: Pubkey,
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct DonationRecorded {
    pub ledger: Pubkey,
    pub donator: Pubkey,
    pub nr: u64,
    pub amount: u64,
    pub refunded: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsWithdrawn {
    pub ledger: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[error_code]
pub enum LedgerError {
    #[msg("Donation not found")]
    DonationNotFound,

    #[msg("Math overflow error")]
    MathOverflow,

    #[msg("Unauthorized action")]
    Unauthorized,

    #[msg("Token account does not match the ledger mint")]
    InvalidMint,

    #[msg("Token account has the wrong owner")]
    InvalidTokenAccount,

    #[msg("Token program does not match the ledger")]
    InvalidTokenProgram,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DONATION_ERROR;

    fn ledger() -> FeedbackLedger {
        FeedbackLedger::new(
            Pubkey::new_from_array([9; 32]),
            Pubkey::new_from_array([8; 32]),
            anchor_spl::token_2022::ID,
            255,
        )
    }

    fn settled(amount: u64, feedback: &str, refunds: &mut Vec<u64>) -> Donation {
        let mut d = Donation::new(
            Pubkey::new_from_array([9; 32]),
            amount,
            Pubkey::new_from_array([7; 32]),
            feedback.to_string(),
            1_700_000_000,
            250,
        );
        d.settle(|amount| {
            refunds.push(amount);
            Ok(())
        })
        .unwrap();
        d
    }

    #[test]
    fn valid_donation_updates_aggregates() {
        let mut l = ledger();
        let mut refunds = Vec::new();

        let nr = l.record(&settled(100, "thanks", &mut refunds)).unwrap();
        assert_eq!(nr, 0);
        assert_eq!(l.max_donation, 100);
        assert_eq!(l.total_donation, 100);
        assert_eq!(l.count, 1);

        let nr = l.record(&settled(40, "again", &mut refunds)).unwrap();
        assert_eq!(nr, 1);
        assert_eq!(l.max_donation, 100);
        assert_eq!(l.total_donation, 140);
        assert_eq!(l.count, 2);
        assert!(refunds.is_empty());
    }

    #[test]
    fn rejected_donation_is_logged_but_not_counted() {
        let mut l = ledger();
        let mut refunds = Vec::new();
        l.record(&settled(100, "thanks", &mut refunds)).unwrap();

        let zero = settled(0, "nothing", &mut refunds);
        l.record(&zero).unwrap();
        assert_eq!(zero.error, DONATION_ERROR);

        let silent = settled(500, "", &mut refunds);
        l.record(&silent).unwrap();

        assert_eq!(refunds, vec![500]);
        assert_eq!(l.max_donation, 100);
        assert_eq!(l.total_donation, 100);
        assert_eq!(l.count, 3);
    }

    #[test]
    fn total_overflow_is_reported() {
        let mut l = ledger();
        l.total_donation = u64::MAX;
        let mut refunds = Vec::new();

        assert!(l.record(&settled(1, "x", &mut refunds)).is_err());
    }

    #[test]
    fn contains_only_appended_indices() {
        let mut l = ledger();
        assert!(!l.contains(0));

        let mut refunds = Vec::new();
        l.record(&settled(0, "", &mut refunds)).unwrap();
        assert!(l.contains(0));
        assert!(!l.contains(1));
    }

    #[test]
    fn info_is_stable_between_mutations() {
        let mut l = ledger();
        let mut refunds = Vec::new();
        l.record(&settled(7, "hi", &mut refunds)).unwrap();

        assert_eq!(l.info(), l.info());
        assert_eq!(
            l.info(),
            DonationInfo {
                max_donation: 7,
                total_donation: 7,
                count: 1
            }
        );
    }

    #[test]
    fn withdrawal_clamps_to_balance() {
        assert_eq!(withdrawal_amount(None, 300), Some(300));
        assert_eq!(withdrawal_amount(Some(0), 300), Some(300));
        assert_eq!(withdrawal_amount(Some(120), 300), Some(120));
        assert_eq!(withdrawal_amount(Some(300), 300), Some(300));
        assert_eq!(withdrawal_amount(Some(301), 300), Some(300));
    }

    #[test]
    fn empty_vault_withdraws_nothing() {
        assert_eq!(withdrawal_amount(Some(10), 0), None);
        assert_eq!(withdrawal_amount(None, 0), None);
    }

    #[test]
    fn ledger_remembers_its_token_program() {
        let l = ledger();
        assert_eq!(l.token_program, anchor_spl::token_2022::ID);
        assert_eq!(l.info().count, 0);
    }

    fn fresh(amount: u64, feedback: &str) -> Donation {
        Donation::new(
            Pubkey::new_from_array([9; 32]),
            amount,
            Pubkey::new_from_array([7; 32]),
            feedback.to_string(),
            1_700_000_000,
            250,
        )
    }

    #[test]
    fn accept_refunds_before_recording() {
        let mut l = ledger();
        let mut d = fresh(50, "");
        let mut sent = Vec::new();

        let (nr, refunded) = l
            .accept(&mut d, |amount| {
                sent.push(amount);
                Ok(())
            })
            .unwrap();

        assert_eq!(sent, vec![50]);
        assert_eq!((nr, refunded), (0, 50));
        assert_eq!(d.amount, 0);
        assert_eq!(l.info(), DonationInfo { max_donation: 0, total_donation: 0, count: 1 });
    }

    #[test]
    fn accept_leaves_ledger_untouched_when_refund_fails() {
        let mut l = ledger();
        let mut d = fresh(50, "");

        let result = l.accept(&mut d, |_| err!(LedgerError::InvalidTokenProgram));

        assert!(result.is_err());
        assert_eq!(l.count, 0);
        assert_eq!(l.total_donation, 0);
    }

    #[test]
    fn accept_keeps_valid_donations() {
        let mut l = ledger();
        let mut d = fresh(100, "thanks");

        let (nr, refunded) = l
            .accept(&mut d, |_| panic!("valid donations are never refunded"))
            .unwrap();

        assert_eq!((nr, refunded), (0, 0));
        assert_eq!(l.info(), DonationInfo { max_donation: 100, total_donation: 100, count: 1 });
    }

    // Log kept in memory the way the program keeps it in PDAs: entry `nr`
    // lives at index `nr` and is only ever pushed.
    #[test]
    fn donate_then_reject_then_inspect() {
        let mut l = ledger();
        let mut log: Vec<Donation> = Vec::new();
        let mut refunds = Vec::new();

        let first = settled(100, "thanks", &mut refunds);
        assert_eq!(l.record(&first).unwrap(), log.len() as u64);
        log.push(first);
        assert_eq!((l.count, l.max_donation, l.total_donation), (1, 100, 100));

        let second = settled(50, "", &mut refunds);
        assert_eq!(l.record(&second).unwrap(), log.len() as u64);
        log.push(second);
        assert_eq!(refunds, vec![50]);

        assert_eq!(
            l.info(),
            DonationInfo {
                max_donation: 100,
                total_donation: 100,
                count: 2
            }
        );

        let view = log[1].view();
        assert_eq!(view.amount, 0);
        assert_eq!(view.error, DONATION_ERROR);
        assert_eq!(log[0].view().amount, 100);
        assert!(!l.contains(2));
    }
}
