pub mod list;
pub mod models;
pub mod selector;

pub use list::FormatList;
pub use models::Format;
pub use selector::FormatSelector;
