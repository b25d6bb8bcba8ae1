//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns field errors, not panic.

pub mod pagination;
pub mod validation;
pub mod wine;

pub use pagination::{Paginated, Pagination, PaginationParams};
pub use validation::{FieldErrors, ValidationError};
pub use wine::{NewWine, WinePatch, WinePayload, MAX_SHORT_TEXT_LEN};
