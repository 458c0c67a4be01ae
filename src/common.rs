pub mod error;
pub(crate) mod number_utils;
