//! Argument deduction.
//!
//! Turns the natural types of construction values into the concrete
//! argument list resolution works on:
//!
//! 1. Deduction guides are tried first, in order. The first guide whose
//!    shapes match the values supplies its argument list verbatim.
//! 2. Otherwise each declared parameter takes the matching value, lowered
//!    according to its passing mode (see [`lower`]), or its default.
//!
//! [`deduce_and_resolve`] chains the result into [`poly_resolve`].

mod decay;
mod deduce;
mod guide;
mod raw;

pub use decay::{decay, lower, natural};
pub use deduce::{deduce, deduce_and_resolve, Deduction, DeductionOrigin, SlotSource};
pub use guide::{DeductionGuide, RawShape};
pub use raw::RawType;
