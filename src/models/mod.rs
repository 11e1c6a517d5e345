// Persisted records of the event catalog and its ledgers

pub mod catalog;
pub mod ledger;
pub mod status;

pub use catalog::{Event, EventAgenda, EventCategory, EventDetail, EventImage, JobCategory};
pub use ledger::{EventMember, EventUserWish, UserCoin};
pub use status::{
    AttendStatus, CategoryStatus, CoinStatus, EventStatus, GainType, RecordStatus, WishStatus,
};
