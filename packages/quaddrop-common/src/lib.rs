pub mod digest;
pub mod math;
pub mod types;

pub use digest::{artefact_digest, artefact_digest_hex};
pub use math::isqrt;
pub use types::{AccountData, AccountKey, Amount, AmountParseError, BasisMode, MigratedAccountRecord};
