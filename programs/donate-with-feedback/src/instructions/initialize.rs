use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface}
};

use crate::constants::LEDGER_SEED;
use crate::state::{FeedbackLedger, LedgerInitialized};

#[derive(Accounts)]
pub struct Initialize <'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer=creator,
        space=FeedbackLedger::INIT_SPACE,
        seeds=[LEDGER_SEED, creator.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, FeedbackLedger>,

    #[account(mint::token_program = token_program)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(init,
        associated_token::mint=mint,
        associated_token::authority=ledger,
        associated_token::token_program=token_program,
        payer=creator)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>
}

impl <'info> Initialize <'info> {
    pub fn initialize(&mut self, bumps: &InitializeBumps) -> Result<()> {
        self.ledger.set_inner(FeedbackLedger::new(
            self.creator.key(),
            self.mint.key(),
            self.token_program.key(),
            bumps.ledger,
        ));

        emit!(LedgerInitialized {
            ledger: self.ledger.key(),
            creator: self.creator.key(),
            mint: self.mint.key(),
            timestamp: Clock::get()?.unix_timestamp
        });
        Ok(())
    }
}
