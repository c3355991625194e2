mod extract;
mod schema;
mod sdg;

pub use extract::{extract, extract_fields, RowSelector};
pub use schema::{Column, SourceFeed};
pub use sdg::{Sdg, SdgTags};
