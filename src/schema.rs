//! Queries against a config struct's confique `Meta` tree.

use confique::meta::{FieldKind, Meta};

/// All leaf key paths of the schema, in declaration order.
///
/// Returns dotted paths like `"port"`, `"database.url"`. Section names
/// (nested structs) are excluded.
pub fn leaf_keys(meta: &Meta) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(meta, "", &mut keys);
    keys
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut Vec<String>) {
    for field in meta.fields {
        let dotted = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.kind {
            FieldKind::Leaf { .. } => keys.push(dotted),
            FieldKind::Nested { meta, .. } => collect_keys(meta, &dotted, keys),
        }
    }
}

/// Whether `dotted_key` names a leaf field of the schema.
pub fn is_leaf_key(meta: &Meta, dotted_key: &str) -> bool {
    leaf_keys(meta).iter().any(|k| k == dotted_key)
}

/// The doc comment lines for a dotted key path, empty if there are none.
pub fn lookup_doc(meta: &Meta, dotted_key: &str) -> Vec<String> {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    lookup_doc_recursive(meta, &segments)
}

fn lookup_doc_recursive(meta: &Meta, segments: &[&str]) -> Vec<String> {
    let Some((head, rest)) = segments.split_first() else {
        return vec![];
    };

    for field in meta.fields {
        if field.name != *head {
            continue;
        }
        if rest.is_empty() {
            return field.doc.iter().map(|s| s.trim().to_string()).collect();
        }
        if let FieldKind::Nested { meta: nested, .. } = &field.kind {
            return lookup_doc_recursive(nested, rest);
        }
    }
    vec![]
}
