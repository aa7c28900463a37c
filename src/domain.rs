mod email_address;
mod units;

pub use email_address::EmailAddress;
pub use units::Units;
