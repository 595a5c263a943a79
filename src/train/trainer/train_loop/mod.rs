//! Multi-epoch training loop
//!
//! - `basic`: the epoch and batch loop behind `Trainer::fit`
//! - `validation`: the nested test run fired between an epoch's last batch
//!   and its epoch end

mod basic;
mod validation;
