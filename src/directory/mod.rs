//! School list: fetch, search, display
//!
//! - One unconditional `GET` per load; manual retry after failure
//! - In-memory, case-insensitive search over name, city and address
//! - Cards with a placeholder image fallback, and list statistics

mod card;
mod filter;
mod image;
mod view;

pub use card::{DirectoryStats, SchoolCard};
pub use filter::{filter_schools, SearchFilter};
pub use image::{image_url, placeholder_data_uri, ImageSource};
pub use view::{
    fetch_failure_message, result_label, DirectorySnapshot, DirectoryView, EmptyState, LoadState,
    FETCH_FAILED_MESSAGE,
};
