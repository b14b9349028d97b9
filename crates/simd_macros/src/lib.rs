mod target;

use target::{TARGET_CPUS, TargetCpu};

struct Versions {
    targets: syn::punctuated::Punctuated<syn::LitStr, syn::Token![,]>,
}

impl syn::parse::Parse for Versions {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        Ok(Versions {
            targets: syn::punctuated::Punctuated::parse_terminated(input)?,
        })
    }
}

fn lookup(target_cpu: &str) -> &'static TargetCpu {
    TARGET_CPUS
        .iter()
        .find(|x| x.target_cpu == target_cpu)
        .unwrap_or_else(|| panic!("unknown target_cpu: {target_cpu}"))
}

/// Compiles the function body once per listed target and once as a portable
/// `fallback`, then dispatches at runtime to the best detected version. The
/// chosen version is cached after the first call.
#[proc_macro_attribute]
pub fn multiversion(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as Versions);
    let item_fn = syn::parse_macro_input!(item as syn::ItemFn);
    let syn::ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item_fn;
    if sig.constness.is_some() || sig.asyncness.is_some() {
        panic!("const or async functions are not supported");
    }
    if sig.variadic.is_some() {
        panic!("variadic parameters are not supported");
    }
    let generics_params = sig.generics.params.clone();
    if generics_params
        .iter()
        .any(|x| !matches!(x, syn::GenericParam::Lifetime(_)))
    {
        panic!("generic parameters other than lifetimes are not supported");
    }
    let generics_where = sig.generics.where_clause.clone();
    let inputs = sig.inputs.clone();
    let output = sig.output.clone();
    let mut arguments = Vec::new();
    for input in sig.inputs.iter() {
        let syn::FnArg::Typed(typed) = input else {
            panic!("receiver parameters are not supported");
        };
        let syn::Pat::Ident(ident) = &*typed.pat else {
            panic!("patterns on parameters are not supported");
        };
        arguments.push(ident.ident.clone());
    }
    let base = sig.ident.to_string();
    let mut versions = quote::quote! {};
    let mut branches = quote::quote! {};
    for target in attr.targets.iter() {
        let target = target.value();
        let TargetCpu {
            target_cpu,
            target_arch,
            ..
        } = lookup(&target);
        let name = syn::Ident::new(
            &format!("{base}_{}", target_cpu.replace('.', "_")),
            proc_macro2::Span::mixed_site(),
        );
        versions.extend(quote::quote! {
            #[inline]
            #[cfg(target_arch = #target_arch)]
            #[crate::target_cpu(enable = #target_cpu)]
            fn #name < #generics_params > (#inputs) #output #generics_where #block
        });
        branches.extend(quote::quote! {
            #[cfg(target_arch = #target_arch)]
            if crate::is_cpu_detected!(#target_cpu) {
                let version: unsafe fn(#inputs) #output = #name;
                CACHE.store(version as *mut (), core::sync::atomic::Ordering::Relaxed);
                return unsafe { version(#(#arguments,)*) };
            }
        });
    }
    quote::quote! {
        #versions
        fn fallback < #generics_params > (#inputs) #output #generics_where #block
        #[inline(always)]
        #(#attrs)* #vis #sig {
            static CACHE: core::sync::atomic::AtomicPtr<()> =
                core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());
            let cache = CACHE.load(core::sync::atomic::Ordering::Relaxed);
            if !cache.is_null() {
                let version = unsafe {
                    core::mem::transmute::<*mut (), unsafe fn(#inputs) #output>(cache)
                };
                return unsafe { version(#(#arguments,)*) };
            }
            #branches
            let version: unsafe fn(#inputs) #output = fallback;
            CACHE.store(version as *mut (), core::sync::atomic::Ordering::Relaxed);
            unsafe { version(#(#arguments,)*) }
        }
    }
    .into()
}

struct Enable {
    enable: syn::LitStr,
}

impl syn::parse::Parse for Enable {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key != "enable" {
            return Err(syn::Error::new(key.span(), "expected `enable`"));
        }
        let _: syn::Token![=] = input.parse()?;
        Ok(Self {
            enable: input.parse()?,
        })
    }
}

/// Expands a target cpu name into the `#[target_feature]` attributes it implies.
#[proc_macro_attribute]
pub fn target_cpu(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as Enable);
    let mut result = quote::quote! {};
    for target_cpu in attr.enable.value().split(',') {
        let target_features = lookup(target_cpu).target_features;
        result.extend(quote::quote! {
            #(#[target_feature(enable = #target_features)])*
        });
    }
    result.extend(proc_macro2::TokenStream::from(item));
    result.into()
}

/// Defines `is_<arch>_cpu_detected!("<target_cpu>")`, forwarding to
/// `crate::internal::is_<target_cpu>_detected()`.
#[proc_macro]
pub fn define_is_cpu_detected(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let target_arch = syn::parse_macro_input!(input as syn::LitStr).value();
    let mut arms = quote::quote! {};
    for TargetCpu { target_cpu, .. } in TARGET_CPUS
        .iter()
        .filter(|x| x.target_arch == target_arch)
    {
        let detect = syn::Ident::new(
            &format!("is_{}_detected", target_cpu.replace('.', "_")),
            proc_macro2::Span::mixed_site(),
        );
        arms.extend(quote::quote! {
            (#target_cpu) => { $crate::internal::#detect() };
        });
    }
    let name = syn::Ident::new(
        &format!("is_{target_arch}_cpu_detected"),
        proc_macro2::Span::mixed_site(),
    );
    quote::quote! {
        #[macro_export]
        macro_rules! #name {
            #arms
        }
    }
    .into()
}
