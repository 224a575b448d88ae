use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives the `CommandName` trait for command enums.
///
/// Each variant is matched against the operator's first token using its
/// lowercased identifier, so `HelloCpp` answers to `hellocpp`. Matching is
/// exact and case-sensitive: `Help` does not answer to `HELP`.
///
/// # Example
///
/// ```ignore
/// use litex_console::CommandName;
///
/// #[derive(Copy, Clone, PartialEq, Eq, CommandName)]
/// pub enum PinCommand {
///     Read,
///     Write,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl CommandName for PinCommand {
///     fn from_name(name: &str) -> Option<Self> {
///         match name {
///             "read" => Some(Self::Read),
///             "write" => Some(Self::Write),
///             _ => None,
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Read => "read",
///             Self::Write => "write",
///         }
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum
/// - All variants must be unit variants (no fields)
/// - Lowercased variant names must be unique
#[proc_macro_derive(CommandName)]
pub fn derive_command_name(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "CommandName can only be derived for enums",
            ));
        }
    };

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "CommandName can only be derived for enums with unit variants (no fields)",
            ));
        }
    }

    // Reject two variants that collapse onto the same command word
    let mut seen: Vec<String> = Vec::new();
    for variant in variants {
        let word = variant.ident.to_string().to_lowercase();
        if seen.contains(&word) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate command name `{}`", word),
            ));
        }
        seen.push(word);
    }

    let from_name_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let word = variant_name.to_string().to_lowercase();
        quote! {
            #word => Some(Self::#variant_name)
        }
    });

    let name_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let word = variant_name.to_string().to_lowercase();
        quote! {
            Self::#variant_name => #word
        }
    });

    Ok(quote! {
        impl ::litex_console::console::commands::CommandName for #name {
            fn from_name(name: &str) -> Option<Self> {
                match name {
                    #(#from_name_arms,)*
                    _ => None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }
        }
    })
}
