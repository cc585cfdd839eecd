pub mod article;
pub mod catalog;
pub mod filter;
pub mod tier;

pub use article::{Article, ArticleId};
pub use catalog::{Catalog, FacetCount, Stats};
pub use filter::{FilterIntent, FilterState};
pub use tier::HopeTier;
