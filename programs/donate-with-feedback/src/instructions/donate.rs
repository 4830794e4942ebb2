use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{DONATION_SEED, LEDGER_SEED};
use crate::state::{Donation, DonationRecorded, FeedbackLedger, LedgerError};

use super::transfer_tokens;

#[derive(Accounts)]
#[instruction(amount: u64, feedback: String)]
pub struct Donate <'info> {
    #[account(mut)]
    pub donator: Signer<'info>,

    #[account(
        mut,
        seeds=[LEDGER_SEED, ledger.creator.as_ref(), ledger.mint.as_ref()],
        bump=ledger.bump
    )]
    pub ledger: Account<'info, FeedbackLedger>,

    #[account(
        init,
        payer = donator,
        space = Donation::space(&feedback),
        seeds = [DONATION_SEED, ledger.key().as_ref(), &ledger.count.to_le_bytes()],
        bump
    )]
    pub donation: Account<'info, Donation>,

    #[account(
        address = ledger.mint @ LedgerError::InvalidMint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = donator_ata.owner == donator.key() @ LedgerError::InvalidTokenAccount,
        constraint = donator_ata.mint == ledger.mint @ LedgerError::InvalidMint
    )]
    pub donator_ata: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = vault.mint == ledger.mint @ LedgerError::InvalidMint,
        constraint = vault.owner == ledger.key() @ LedgerError::InvalidTokenAccount
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    #[account(
        address = ledger.token_program @ LedgerError::InvalidTokenProgram,
    )]
    pub token_program: Interface<'info, TokenInterface>
}

impl <'info> Donate <'info> {
    pub fn donate(&mut self, amount: u64, feedback: String, bumps: &DonateBumps) -> Result<()> {
        // Incoming transfer: the donated tokens land in the vault before the
        // donation is judged.
        if amount > 0 {
            transfer_tokens(
                &self.token_program,
                &self.donator_ata,
                &self.mint,
                &self.vault,
                self.donator.to_account_info(),
                &[],
                amount,
            )?;
        }

        let timestamp = Clock::get()?.unix_timestamp;
        let mut donation = Donation::new(
            self.ledger.key(),
            amount,
            self.donator.key(),
            feedback,
            timestamp,
            bumps.donation,
        );

        let ledger_info = self.ledger.to_account_info();
        let (creator, mint, bump) = (self.ledger.creator, self.ledger.mint, self.ledger.bump);
        let ledger_seeds = &[LEDGER_SEED, creator.as_ref(), mint.as_ref(), &[bump]];
        let signer = &[&ledger_seeds[..]];

        let (nr, refunded) = self.ledger.accept(&mut donation, |refund| {
            transfer_tokens(
                &self.token_program,
                &self.vault,
                &self.mint,
                &self.donator_ata,
                ledger_info,
                signer,
                refund,
            )
        })?;
        if !donation.error.is_empty() {
            msg!("dwf.donate: rejected donation, refunded {}", refunded);
        }

        emit!(DonationRecorded {
            ledger: self.ledger.key(),
            donator: self.donator.key(),
            nr,
            amount: donation.amount,
            refunded,
            timestamp
        });

        self.donation.set_inner(donation);
        Ok(())
    }
}
