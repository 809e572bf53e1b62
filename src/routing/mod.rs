/// Destination routing: phone normalization and country-based transport selection
pub mod countries;
pub mod phone;

pub use countries::{CountryProfile, Language, select_profile};
pub use phone::PhoneNumber;
