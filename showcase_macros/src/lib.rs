mod model;
mod validate;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Model)]
// ============================================================================

/// Derive macro for the `Model` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Model)]
/// #[model(collection = "setups")]
/// struct Setup {
///     #[model(id)]
///     pub id: String,
///     pub title: String,
/// }
/// ```
///
/// - `#[model(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[model(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}

// ============================================================================
// #[derive(Validate)]
// ============================================================================

/// Derive macro for the `Validate` trait.
///
/// Fields marked `#[validate(non_empty)]` are checked in declaration order;
/// the first empty one is reported.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// #[serde(rename_all = "camelCase")]
/// struct NewSetup {
///     #[validate(non_empty, message = "Title is required")]
///     pub title: String,
///     #[validate(non_empty, message = "Image is required")]
///     pub image_url: String,
/// }
/// ```
///
/// - `message = "..."` overrides the default `"<field> is required"`.
/// - `field = "..."` overrides the reported field name. By default the
///   camelCase form of the Rust field name is used, matching the wire name.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    validate::derive_validate(input)
}
