use crate::resource::Searchable;

/// Case-insensitive substring match over an already-fetched page.
///
/// A blank term keeps everything.
pub fn filter_items<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    let needle = term.trim().to_lowercase();

    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.haystack()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_items;
    use crate::{fixtures, resource::Resource};

    #[test]
    fn test_matches_any_field() {
        let references = fixtures::references();

        let by_author = filter_items(&references, "siti");
        assert_eq!(by_author.len(), 2);

        let by_description = filter_items(&references, "FILOSOFINYA");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id(), 4);
    }

    #[test]
    fn test_blank_term_keeps_all() {
        let assets = fixtures::assets();

        assert_eq!(filter_items(&assets, "   ").len(), assets.len());
    }

    #[test]
    fn test_asset_type_is_searchable() {
        let assets = fixtures::assets();

        let models = filter_items(&assets, "model_3d");
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].nama_file, "candi-borobudur-3d.glb");
    }

    #[test]
    fn test_no_match() {
        assert!(filter_items(&fixtures::contributors(), "ludruk").is_empty());
    }
}
