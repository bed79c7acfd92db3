//! Page-level state: the report collection, the filter, and which
//! dialog or report is open.

mod page;

pub use page::Board;
