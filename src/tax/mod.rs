pub mod bands;
pub mod limited;
pub mod paye;

pub use bands::{BandTableError, TaxBandTable, TaxYear};
pub use limited::{limited_company, LimitedBreakdown};
pub use paye::{deemed_payment, PayeBreakdown};
