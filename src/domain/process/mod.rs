//! Process Module - Judicial process records as received from court systems.
//!
//! A [`Process`] is the inbound case record: identification, jurisdiction,
//! optional judgment amount, attached documents and procedural movements.
//! Shape validation happens at the deserialization boundary; everything
//! downstream assumes a well-formed record.

mod record;

pub use record::{Document, Movement, Process};
