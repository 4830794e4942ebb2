#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use crate::instructions::*;
use crate::state::*;

declare_id!("3URJpYKYbghPepH4LinZcryYMEp3eKsL2bsHSutp85aM");

#[program]
pub mod donate_with_feedback {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)?;
        Ok(())
    }

    pub fn donate(ctx: Context<Donate>, amount: u64, feedback: String) -> Result<()> {
        ctx.accounts.donate(amount, feedback, &ctx.bumps)?;
        Ok(())
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: Option<u64>) -> Result<()> {
        ctx.accounts.withdraw(amount)?;
        Ok(())
    }

    pub fn view_donation(ctx: Context<ViewDonation>, nr: u64) -> Result<DonationView> {
        ctx.accounts.view_donation(nr)
    }

    pub fn view_donation_info(ctx: Context<ViewDonationInfo>) -> Result<DonationInfo> {
        ctx.accounts.view_donation_info()
    }
}
