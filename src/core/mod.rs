//! Read-only services layered over a loaded [`crate::ledger::Ledger`].

pub mod services;
