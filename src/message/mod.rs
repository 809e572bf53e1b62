pub mod composer;
pub mod templates;

pub use composer::{compose_alert, compose_test, AlertDetails};
pub use templates::{strings_for, Strings};
