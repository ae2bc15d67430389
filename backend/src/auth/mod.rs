mod bearer;
mod credentials;
mod email;

pub use bearer::bearer_token;
pub use credentials::{check_password, generate_token};
pub use email::validate_email;
