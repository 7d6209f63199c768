//! Domain models: Member, Grantee, Council, MonthRecord

pub mod council;
pub mod grantee;
pub mod member;

pub use council::{Council, MonthRecord};
pub use grantee::Grantee;
pub use member::Member;
