//! Error types.
//!
//! Rule failures are data: they are reported as [`ValidationError`]s inside an
//! [`ErrorReport`](crate::ErrorReport), never returned as `Err`. The only `Err`
//! path in the crate is [`DeclarationError`], raised when a JSON rule
//! declaration has the wrong shape.

mod declaration_error;
mod validation_error;

pub use declaration_error::DeclarationError;
pub(crate) use declaration_error::value_type_name;
pub use validation_error::{FieldError, ValidationError, ValidationErrors};
