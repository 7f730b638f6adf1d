//! Password hashing and bearer tokens.

mod password;
mod token;

pub use password::PasswordManager;
pub use token::{Claims, TokenError, TokenManager, TokenPair, TokenType};
