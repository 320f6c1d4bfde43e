pub mod school_repo;
pub use school_repo::SchoolRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;

// Migrações embutidas no binário; rodam no startup e no setup dos testes.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
