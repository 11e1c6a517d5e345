// Infrastructure: storage, caller identity and request plumbing
pub mod database;   // SQLite pool, schema and units of work
pub mod identity;   // Upstream identity provider seam
pub mod middleware; // Viewer context middleware and extractor
pub mod viewer;     // Request-scoped viewer context

pub use database::{Database, UnitOfWork};
pub use identity::{HeaderIdentityProvider, Identity, IdentityProvider};
pub use middleware::{viewer_context_middleware, HasIdentityProvider, Vc};
pub use viewer::ViewerContext;
