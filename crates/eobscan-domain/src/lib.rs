//! Eobscan Domain Layer
//!
//! Value types and collaborator traits for the EOB extraction engine. The crate
//! keeps its dependency list short (decimal arithmetic and serde only) and holds
//! no I/O: PDF access and OCR are reached through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **Claim**: one patient's billed services on a single date, taken from one
//!   fragment of an Explanation-of-Benefits report
//! - **Money**: signed fixed-point decimal with two fractional digits
//! - **Procedure code**: canonical `Vdddd` code used by the billing system
//! - **Report**: the ordered claims of one document plus rejected fragments

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod code;
pub mod money;
pub mod patient;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, LineItem};
pub use code::ProcedureCode;
pub use money::Money;
pub use patient::{DateOfService, PatientName};
pub use report::{ClaimReport, FragmentRejection, RejectionReason, TextMode};
