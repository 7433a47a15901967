//! Proc macros for sift.
//!
//! - [`Record`] - Generate typed field descriptors for a struct
//!
//! The generated code refers to `::sift`, so the deriving crate must depend
//! on `sift` (usually through its `macros` feature, which re-exports the
//! derive as `sift::Record`).

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives typed field descriptors and the `sift::Record` trait.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Generate no descriptor for this field |
/// | `rename = "..."` | Use a custom name in canonical text |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. One `pub const` descriptor per field, named in SCREAMING_SNAKE_CASE
///    after the field (or its `rename`), of type `sift::Field<Self, FieldTy>`
/// 2. An implementation of `sift::Record` listing the field names
///
/// # Example
///
/// ```ignore
/// use sift::{Evaluate, Record};
///
/// #[derive(Record)]
/// struct Task {
///     name: String,
///     priority: u8,
///     tags: Vec<String>,
///
///     #[record(rename = "done")]
///     completed: bool,
///
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let tasks = vec![
///     Task { name: "Write docs".into(), priority: 3, tags: vec![], completed: false, internal_id: 1 },
///     Task { name: "Fix bug".into(), priority: 5, tags: vec![], completed: true, internal_id: 2 },
/// ];
///
/// let query = sift::select(Task::PRIORITY)
///     .greater_or_equal(3)
///     .and(sift::select(Task::DONE).equal_to(false));
///
/// let results = query.filter(&tasks);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name, "Write docs");
/// assert_eq!(Task::FIELDS, &["name", "priority", "tags", "done"]);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
