pub mod cache;
pub mod controller;
pub mod debounce;
pub mod entity;
pub mod query;
pub mod refine;
pub mod table;

pub use cache::{FetchTicket, QueryCache};
pub use controller::ListController;
pub use debounce::{CommittedSearch, Debouncer};
pub use entity::{ALL, FilterDef, FilterScope, ListEntity, NAME_SORT_KEY};
pub use query::{ListQuery, QueryKey, SortDirection, SortSpec};
pub use refine::refine;
pub use table::{PageSummary, RowView, TableState, TableView};
