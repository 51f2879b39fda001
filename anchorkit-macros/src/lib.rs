use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive macro that builds the field extractor list used by change tracking.
///
/// Every field marked with `#[track]` becomes a named extractor. The field type
/// must convert into `anchorkit::change::FieldValue` (`f32`, `bool`, `i32`, `u32`
/// and `Vec2` do).
///
/// # Example
/// ```ignore
/// #[derive(Clone, Tracked)]
/// pub struct SliderFill {
///     #[track]
///     value: f32,
///     #[track]
///     vertical: bool,
///     label: String,
/// }
///
/// let tracker = FieldTracker::<SliderFill>::derived();
/// let snapshot = tracker.take(&fill);
/// ```
#[proc_macro_derive(Tracked, attributes(track))]
pub fn derive_tracked(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    struct_name,
                    "Tracked can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(struct_name, "Tracked can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let tracked: Vec<_> = fields
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("track")))
        .filter_map(|field| field.ident.clone())
        .collect();

    if tracked.is_empty() {
        return syn::Error::new_spanned(
            struct_name,
            "Tracked needs at least one field marked with #[track]",
        )
        .to_compile_error()
        .into();
    }

    let extractors = tracked.iter().map(|name| {
        let label = name.to_string();
        quote! {
            ::anchorkit::change::Field::new(#label, |source: &Self| {
                ::anchorkit::change::FieldValue::from(source.#name)
            })
        }
    });

    let expanded = quote! {
        impl #impl_generics ::anchorkit::change::Tracked for #struct_name #ty_generics #where_clause {
            fn tracked_fields() -> ::std::vec::Vec<::anchorkit::change::Field<Self>> {
                ::std::vec![#(#extractors),*]
            }
        }
    };

    TokenStream::from(expanded)
}
