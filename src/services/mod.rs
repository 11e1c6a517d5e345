pub mod coin_ledger;
pub mod event_catalog;
pub mod event_category_registry;
pub mod job_category_registry;
pub mod membership_ledger;
pub mod search;

pub use coin_ledger::CoinLedger;
pub use event_catalog::EventCatalog;
pub use event_category_registry::EventCategoryRegistry;
pub use job_category_registry::JobCategoryRegistry;
pub use membership_ledger::MembershipLedger;
pub use search::SearchFacade;
