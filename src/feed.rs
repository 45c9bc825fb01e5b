//! Atom feed of dated posts

use crate::config::SiteConfig;
use crate::post::PostSummary;

/// Feed file name, relative to the output root
pub const FEED_FILE: &str = "feed.atom";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the feed for `posts` (already sorted). Drafts are left out.
///
/// Returns `None` when `site.url` is unset, since entry ids must be absolute,
/// or when there is nothing to publish.
pub fn render_feed(site: &SiteConfig, posts: &[PostSummary]) -> Option<String> {
    let base = site.url.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    let published: Vec<&PostSummary> = posts.iter().filter(|p| !p.header.is_draft()).collect();
    let updated = published.iter().filter_map(|p| p.header.last_changed()).max()?;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
    out.push_str(&format!("  <title>{}</title>\n", escape(&site.title)));
    out.push_str(&format!("  <link href=\"{base}/{FEED_FILE}\" rel=\"self\"/>\n"));
    out.push_str(&format!("  <link href=\"{base}/\"/>\n"));
    out.push_str(&format!("  <id>{base}/</id>\n"));
    out.push_str(&format!("  <updated>{}</updated>\n", escape(updated)));
    if !site.author.is_empty() {
        out.push_str(&format!(
            "  <author>\n    <name>{}</name>\n  </author>\n",
            escape(&site.author)
        ));
    }

    for post in published {
        let link = format!("{base}{}", post.url_path);
        let created = post.header.created.as_deref().unwrap_or_default();
        out.push_str("  <entry>\n");
        out.push_str(&format!("    <title>{}</title>\n", escape(&post.header.title)));
        out.push_str(&format!("    <link href=\"{}\"/>\n", escape(&link)));
        out.push_str(&format!("    <id>{}</id>\n", escape(&link)));
        out.push_str(&format!("    <published>{}</published>\n", escape(created)));
        out.push_str(&format!(
            "    <updated>{}</updated>\n",
            escape(post.header.last_changed().unwrap_or(created))
        ));
        if !post.header.subtitle.is_empty() {
            out.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape(&post.header.subtitle)
            ));
        }
        out.push_str("  </entry>\n");
    }

    out.push_str("</feed>\n");
    Some(out)
}
