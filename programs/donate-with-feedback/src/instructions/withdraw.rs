use anchor_lang::prelude::*;

use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{TokenAccount, TokenInterface, Mint}
};

use crate::constants::LEDGER_SEED;
use crate::state::{withdrawal_amount, FeedbackLedger, FundsWithdrawn, LedgerError};

use super::transfer_tokens;

#[derive(Accounts)]
pub struct Withdraw <'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        address = ledger.mint @ LedgerError::InvalidMint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        has_one = creator @ LedgerError::Unauthorized,
        seeds=[LEDGER_SEED, ledger.creator.as_ref(), ledger.mint.as_ref()],
        bump=ledger.bump
    )]
    pub ledger: Account<'info, FeedbackLedger>,

    #[account(
        mut,
        constraint = vault.mint == ledger.mint @ LedgerError::InvalidMint,
        constraint = vault.owner == ledger.key() @ LedgerError::InvalidTokenAccount
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program
    )]
    pub creator_ata: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    #[account(
        address = ledger.token_program @ LedgerError::InvalidTokenProgram,
    )]
    pub token_program: Interface<'info, TokenInterface>
}

impl <'info> Withdraw <'info> {
    pub fn withdraw(&mut self, amount: Option<u64>) -> Result<()> {
        let Some(amount) = withdrawal_amount(amount, self.vault.amount) else {
            msg!("dwf.withdraw: nothing to withdraw");
            return Ok(());
        };

        let ledger_seeds = &[
            LEDGER_SEED,
            self.ledger.creator.as_ref(),
            self.ledger.mint.as_ref(),
            &[self.ledger.bump],
        ];
        let signer = &[&ledger_seeds[..]];

        transfer_tokens(
            &self.token_program,
            &self.vault,
            &self.mint,
            &self.creator_ata,
            self.ledger.to_account_info(),
            signer,
            amount,
        )?;

        emit!(FundsWithdrawn {
            ledger: self.ledger.key(),
            creator: self.creator.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp
        });
        Ok(())
    }
}
