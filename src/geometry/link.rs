use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// Cloud-drive share links: `<origin>/[file/]d/<id>/...`.
static SHARE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<origin>https?://[^/]*drive[^/]*)/(?:file/)?d/(?P<id>[^/]+)/")
        .expect("share-link pattern compiles")
});

/// File identifier of a recognized share link.
pub fn share_link_id(url: &str) -> Option<&str> {
    SHARE_LINK.captures(url)?.name("id").map(|m| m.as_str())
}

/// Rewrite a recognized share link into its direct-download form; any other
/// URL is returned unchanged. Pure string transform.
pub fn direct_download_url(url: &str) -> Cow<'_, str> {
    match SHARE_LINK.captures(url) {
        Some(caps) => Cow::Owned(format!("{}/uc?export=download&id={}", &caps["origin"], &caps["id"])),
        None => Cow::Borrowed(url),
    }
}
