pub mod privatbank;

pub use privatbank::{PrivatBankProvider, parse_response};
