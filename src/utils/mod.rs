//! Utility functions and helpers.

pub mod validation;

pub use validation::{
    create_validator, field_validator, is_valid_email, is_valid_password, is_valid_username,
    new_user_validator, FieldCheck, FieldSource, FieldValidator, ValidationOutcome, Validator,
};
