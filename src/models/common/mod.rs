pub mod party;
pub mod response;

pub use party::Party;
