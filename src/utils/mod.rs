pub mod code;
pub mod url_validator;

pub use code::{CodeGenerator, UuidCodeGenerator, is_valid_short_code};
pub use url_validator::validate_url;
