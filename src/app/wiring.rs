use std::sync::Arc;

use anyhow::{Context, Result};

use crate::context::{self, Backend};
use crate::rest::SharedStore;
use crate::storage::{FileStore, SheetStore, SqliteSheet};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    Ok(())
}

/// Builds the configured store. A sheet store that cannot connect is fatal.
pub fn init_store(ctx: &context::Context) -> Result<SharedStore> {
    match ctx.backend {
        Backend::File => {
            let store = FileStore::open(&ctx.data_file)
                .with_context(|| format!("opening data file {}", ctx.data_file.display()))?;
            Ok(Arc::new(store))
        }
        Backend::Sheet => {
            let sheet = SqliteSheet::connect(&ctx.sheet_db).with_context(|| {
                format!(
                    "failed to connect to sheet store {}; check the sheet configuration",
                    ctx.sheet_db.display()
                )
            })?;
            let store = SheetStore::new(sheet, ctx.worksheet.clone()).with_cache_ttl(ctx.cache_ttl);
            Ok(Arc::new(store))
        }
    }
}
