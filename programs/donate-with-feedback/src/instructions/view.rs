use anchor_lang::prelude::*;

use crate::constants::{DONATION_SEED, LEDGER_SEED};
use crate::state::{Donation, DonationInfo, DonationView, FeedbackLedger, LedgerError};

#[derive(Accounts)]
#[instruction(nr: u64)]
pub struct ViewDonation<'info> {
    #[account(
        seeds=[LEDGER_SEED, ledger.creator.as_ref(), ledger.mint.as_ref()],
        bump=ledger.bump
    )]
    pub ledger: Account<'info, FeedbackLedger>,

    /// CHECK: may not exist when `nr` is out of range; deserialized by the
    /// handler after the range check.
    #[account(
        seeds=[DONATION_SEED, ledger.key().as_ref(), &nr.to_le_bytes()],
        bump
    )]
    pub donation: UncheckedAccount<'info>,
}

impl<'info> ViewDonation<'info> {
    pub fn view_donation(&self, nr: u64) -> Result<DonationView> {
        require!(self.ledger.contains(nr), LedgerError::DonationNotFound);
        require_keys_eq!(*self.donation.owner, crate::ID, LedgerError::DonationNotFound);

        let data = self.donation.try_borrow_data()?;
        let donation = Donation::try_deserialize(&mut &data[..])?;
        Ok(donation.view())
    }
}

#[derive(Accounts)]
pub struct ViewDonationInfo<'info> {
    #[account(
        seeds=[LEDGER_SEED, ledger.creator.as_ref(), ledger.mint.as_ref()],
        bump=ledger.bump
    )]
    pub ledger: Account<'info, FeedbackLedger>,
}

impl<'info> ViewDonationInfo<'info> {
    pub fn view_donation_info(&self) -> Result<DonationInfo> {
        Ok(self.ledger.info())
    }
}
