//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Single type argument of a smart pointer wrapper (`Box`, `Rc`, `Arc`).
fn pointer_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if !matches!(seg.ident.to_string().as_str(), "Box" | "Rc" | "Arc") {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// `Option<T>`, possibly behind references or smart pointers
/// (`Box<Option<T>>`, `Arc<Option<T>>`, `&Option<T>`).
pub fn is_nullable_type(mut ty: &syn::Type) -> bool {
    loop {
        if option_inner(ty).is_some() {
            return true;
        }
        ty = match ty {
            syn::Type::Reference(r) => &r.elem,
            syn::Type::Paren(p) => &p.elem,
            syn::Type::Group(g) => &g.elem,
            other => match pointer_inner(other) {
                Some(inner) => inner,
                None => return false,
            },
        };
    }
}

/// Strip references, parentheses, `Option` and smart pointers.
fn peel(mut ty: &syn::Type) -> &syn::Type {
    loop {
        ty = match ty {
            syn::Type::Reference(r) => &r.elem,
            syn::Type::Paren(p) => &p.elem,
            syn::Type::Group(g) => &g.elem,
            other => match option_inner(other).or_else(|| pointer_inner(other)) {
                Some(inner) => inner,
                None => return other,
            },
        };
    }
}

fn is_fn_bound(bound: &syn::TypeParamBound) -> bool {
    let syn::TypeParamBound::Trait(trait_bound) = bound else {
        return false;
    };
    trait_bound
        .path
        .segments
        .last()
        .is_some_and(|seg| matches!(seg.ident.to_string().as_str(), "Fn" | "FnMut" | "FnOnce"))
}

/// Function pointers and `dyn Fn*` / `impl Fn*` objects, possibly wrapped.
pub fn is_func_type(ty: &syn::Type) -> bool {
    match peel(ty) {
        syn::Type::BareFn(_) => true,
        syn::Type::TraitObject(obj) => obj.bounds.iter().any(is_fn_bound),
        syn::Type::ImplTrait(imp) => imp.bounds.iter().any(is_fn_bound),
        _ => false,
    }
}

/// Channel endpoints from std, crossbeam or tokio, possibly wrapped.
pub fn is_channel_type(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = peel(ty) else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|seg| {
        matches!(
            seg.ident.to_string().as_str(),
            "Sender" | "Receiver" | "SyncSender" | "UnboundedSender" | "UnboundedReceiver"
        )
    })
}
