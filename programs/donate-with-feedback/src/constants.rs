use anchor_lang::prelude::*;

#[constant]
pub const LEDGER_SEED: &[u8] = b"ledger";

#[constant]
pub const DONATION_SEED: &[u8] = b"donation";

/// Stored in `Donation::error` for every rejected donation.
pub const DONATION_ERROR: &str = "error: empty feedback or donated amount = 0";
