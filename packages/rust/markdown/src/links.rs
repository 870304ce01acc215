//! Relative link rewriting for documents rendered outside their site generator.
//!
//! Site generators resolve `../target` against the page URL, which sits one
//! level below the file's directory. A plain Markdown converter resolves it
//! against the file itself, so those links break once pages are bundled.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Inline link whose target starts with one `../` hop.
static PARENT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+?)\]\(\.\./(.+?)\)").expect("valid regex")
});

/// Replace the `../` prefix of every `[label](../target)` link with `base_dir`.
///
/// `[label](../images/x.png)` becomes `[label](<base_dir>/images/x.png)`.
/// Same-directory, absolute and external links are left alone.
pub fn rewrite_parent_links(md: &str, base_dir: &Path) -> String {
    let base = base_dir.display().to_string();

    PARENT_LINK_RE
        .replace_all(md, |caps: &Captures<'_>| {
            format!("[{}]({}/{})", &caps[1], base, &caps[2])
        })
        .into_owned()
}
