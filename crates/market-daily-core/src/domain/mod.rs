//! # Domain Models
//!
//! Typed records flowing through the snapshot pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RawInstrumentRow`] | Unvalidated row from the tabular source |
//! | [`Instrument`] | Normalized equity, commodity or crypto entry |
//! | [`FxQuote`] | Exchange-rate level from the external feed |
//! | [`Snapshot`] | Dated aggregate persisted between the two stages |
//! | [`Category`] | Closed classification (equity, commodities, crypto, fx) |
//! | [`SnapshotDate`] | Build day in UTC+9 |

mod category;
mod date;
mod models;

pub use category::Category;
pub use date::{SnapshotDate, SNAPSHOT_OFFSET};
pub use models::{FxQuote, Instrument, RawInstrumentRow, Snapshot};
