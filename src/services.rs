pub mod school_service;
pub use school_service::SchoolService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod ledger_service;
pub use ledger_service::LedgerService;
