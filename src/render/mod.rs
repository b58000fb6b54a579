//! Output rendering for product records.
//!
//! The table renderer writes rows into a [`dom`](crate::dom) tree; the text
//! and JSON renderers produce standalone strings for terminal and machine
//! consumers.
//!
//! # Example
//!
//! ```
//! use prodtable::model::{DatasetVariant, ProductRecord};
//! use prodtable::render::{to_json, to_text, JsonFormat};
//!
//! let records = vec![ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%")];
//! let refs: Vec<&ProductRecord> = records.iter().collect();
//!
//! let text = to_text(&refs, DatasetVariant::Chemical, "No products found.");
//! assert!(text.contains("Acetone"));
//!
//! let json = to_json(&refs, JsonFormat::Compact)?;
//! assert!(json.starts_with('['));
//! # Ok::<(), prodtable::Error>(())
//! ```

mod json;
mod table;
mod text;

pub use json::{to_json, JsonFormat};
pub use table::{
    category_select, distinct_categories, message_row, populate_category_options,
    render_message, render_rows, table_skeleton, LOAD_ERROR_MESSAGE, NO_PRODUCTS_MESSAGE,
};
pub use text::to_text;
