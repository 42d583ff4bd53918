pub mod file;
pub mod lock;
pub mod sheet;
pub mod sqlite_sheet;
pub mod traits;

pub use file::FileStore;
pub use sheet::{SheetClient, SheetStore, Table};
pub use sqlite_sheet::SqliteSheet;
pub use traits::CollectionStore;
