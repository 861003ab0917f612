use std::future::Future;

use crate::{
    errors::{RepositoryError, ServiceError},
    utils::{generate_slug_suffix, slugify},
};

const FALLBACK_SLUG: &str = "item";
const SUFFIX_LEN: usize = 6;

fn is_suffixed(slug: &str, base: &str) -> bool {
    slug.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|suffix| {
            suffix.len() == SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Slug for `name`, suffixed when another row already uses it.
///
/// `current` is the row's own slug on update; keeping the same base
/// never counts as a collision.
pub(crate) async fn unique_slug<F, Fut>(
    name: &str,
    current: Option<&str>,
    exists: F,
) -> Result<String, ServiceError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, RepositoryError>>,
{
    let mut base = slugify(name);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    if let Some(current) = current {
        if current == base || is_suffixed(current, &base) {
            return Ok(current.to_string());
        }
    }

    if !exists(base.clone()).await? {
        return Ok(base);
    }

    let suffix = generate_slug_suffix()
        .map_err(|e| ServiceError::Internal(format!("Failed to generate slug: {e}")))?;

    Ok(format!("{base}-{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn free_slug_is_used_as_is() {
        let slug = unique_slug("Áo thun nam", None, |_| async { Ok(false) })
            .await
            .unwrap();

        assert_eq!(slug, "ao-thun-nam");
    }

    #[tokio::test]
    async fn taken_slug_gets_suffix() {
        let slug = unique_slug("Áo thun nam", None, |s| async move {
            Ok(s == "ao-thun-nam")
        })
        .await
        .unwrap();

        assert!(slug.starts_with("ao-thun-nam-"));
        assert_eq!(slug.len(), "ao-thun-nam-".len() + 6);
    }

    #[tokio::test]
    async fn renaming_to_same_base_keeps_current_slug() {
        let slug = unique_slug("Áo Thun Nam", Some("ao-thun-nam-x1y2z3"), |_| async {
            Ok(true)
        })
        .await
        .unwrap();

        assert_eq!(slug, "ao-thun-nam-x1y2z3");
    }

    #[tokio::test]
    async fn shorter_name_does_not_keep_longer_slug() {
        let slug = unique_slug("Áo thun", Some("ao-thun-nam"), |_| async { Ok(false) })
            .await
            .unwrap();

        assert_eq!(slug, "ao-thun");
    }

    #[tokio::test]
    async fn symbols_only_name_falls_back() {
        let slug = unique_slug("!!!", None, |_| async { Ok(false) })
            .await
            .unwrap();

        assert_eq!(slug, "item");
    }
}
