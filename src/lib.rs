pub mod cli;
pub mod company;
pub mod config;
pub mod export;
pub mod loader;
pub mod logger;
pub mod lookup;
pub mod pipeline;
pub mod scrape;
pub mod slug;

pub use company::{Company, ContactPatch};
pub use config::AppConfig;
pub use loader::{load_companies, LoadError};
pub use lookup::{enrich, LookupClient, LookupPage};
