use anchor_lang::prelude::*;

use crate::constants::DONATION_ERROR;

/// One entry of the donation log. Written once by `donate`, never touched again.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Donation {
    pub ledger: Pubkey,  // Parent ledger
    pub amount: u64,     // Amount kept by the ledger (0 when rejected)
    pub donator: Pubkey, // Caller's wallet
    pub error: String,   // Empty for valid donations
    pub feedback: String,
    pub timestamp: i64,
    pub bump: u8,
}

impl Donation {
    /// Account size for a donation carrying `feedback`. The error slot is
    /// always sized for the diagnostic so the layout does not depend on the
    /// outcome.
    pub fn space(feedback: &str) -> usize {
        8       // Discriminator
        + 32    // ledger: Pubkey
        + 8     // amount: u64
        + 32    // donator: Pubkey
        + 4 + DONATION_ERROR.len() // error: String
        + 4 + feedback.len()       // feedback: String
        + 8     // timestamp: i64
        + 1     // bump: u8
    }

    pub fn new(
        ledger: Pubkey,
        amount: u64,
        donator: Pubkey,
        feedback: String,
        timestamp: i64,
        bump: u8,
    ) -> Self {
        Self {
            ledger,
            amount,
            donator,
            error: String::new(),
            feedback,
            timestamp,
            bump,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.amount > 0 && !self.feedback.is_empty()
    }

    /// Applies the validation rule. A rejected donation gets the diagnostic,
    /// and any funds it carried are handed to `refund` before the stored
    /// amount is zeroed. Returns the refunded amount.
    pub fn settle<F>(&mut self, refund: F) -> Result<u64>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        if self.is_valid() {
            return Ok(0);
        }

        self.error = DONATION_ERROR.to_string();

        let refunded = self.amount;
        if refunded > 0 {
            refund(refunded)?;
            self.amount = 0;
        }
        Ok(refunded)
    }

    pub fn view(&self) -> DonationView {
        DonationView {
            amount: self.amount,
            donator: self.donator,
            error: self.error.clone(),
            feedback: self.feedback.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Result of `view_donation`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DonationView {
    pub amount: u64,
    pub donator: Pubkey,
    pub error: String,
    pub feedback: String,
    pub timestamp: i64,
}
