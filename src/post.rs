//! Posts
//!
//! A page may start with a header block of `key: value` lines ended by a
//! blank line:
//!
//! ```text
//! title: Hello
//! subtitle: A first post
//! created: 2023-11-19T20:44:13+09:00
//! updated: 2023-11-20T08:00:00+09:00
//!
//! <p>Body...</p>
//! ```
//!
//! Such a page is a post. Its body is wrapped in the site template, and the
//! site index lists every dated post, newest first.

use serde::Serialize;

use crate::config::Config;
use crate::markup::{parse_document, parse_fragment_into, Element};

/// `id` of the post list on the index page
pub const POST_LIST_ID: &str = "post-list";

/// Heading written above a post list the index did not provide
pub const POST_LIST_HEADING: &str = "Weblog";

const HEADER_KEYS: &[&str] = &["title", "subtitle", "created", "updated"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Metadata from a page's header block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub title: String,
    pub subtitle: String,
    /// ISO-8601 timestamp; posts without one are drafts
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl PostHeader {
    pub fn is_draft(&self) -> bool {
        self.created.is_none()
    }

    /// Timestamp of the last change, falling back to creation
    pub fn last_changed(&self) -> Option<&str> {
        self.updated.as_deref().or(self.created.as_deref())
    }
}

/// A dated post as it appears in the index and the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub url_path: String,
    pub header: PostHeader,
}

/// Split the header block off `source`.
///
/// Only a first line of the form `title:`, `subtitle:`, `created:` or
/// `updated:` opens a header; anything else is plain markup and comes back
/// untouched. Lines without a colon and unknown keys inside the block are
/// skipped.
pub fn split_header(source: &str) -> (Option<PostHeader>, &str) {
    let first = source.lines().next().unwrap_or_default();
    let opens = first
        .split_once(':')
        .is_some_and(|(key, _)| HEADER_KEYS.contains(&key.trim()));
    if !opens {
        return (None, source);
    }

    let mut header = PostHeader::default();
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        offset += line.len();
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            break;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "title" => header.title = value,
            "subtitle" => header.subtitle = value,
            "created" if !value.is_empty() => header.created = Some(value),
            "updated" if !value.is_empty() => header.updated = Some(value),
            _ => {}
        }
    }

    (Some(header), &source[offset..])
}

fn date_parts(stamp: &str) -> Option<(u32, u32, u32)> {
    let date = stamp.split(['T', ' ']).next()?;
    let mut parts = date.split('-').map(|p| p.trim().parse::<u32>().ok());
    let year = parts.next()??;
    let month = parts.next()??;
    let day = parts.next()??;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

/// `2023-11-19T20:44:13+09:00` -> `2023-11-19`
pub fn short_date(stamp: &str) -> Option<String> {
    let (year, month, day) = date_parts(stamp)?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// `2023-11-19T20:44:13+09:00` -> `19 Nov 2023`
pub fn display_date(stamp: &str) -> Option<String> {
    let (year, month, day) = date_parts(stamp)?;
    let name = MONTHS.get(month as usize - 1)?;
    Some(format!("{day:02} {name} {year:04}"))
}

/// Wrap a post body in the site template.
///
/// The update date becomes the element the footnote list is placed before.
pub fn render_template(header: &PostHeader, body: &str, config: &Config) -> String {
    let site = &config.site;
    let created = header
        .created
        .as_deref()
        .and_then(display_date)
        .unwrap_or_else(|| "DRAFT".to_string());

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if !site.url.is_empty() {
        out.push_str(&format!(
            "<link href=\"/{}\" type=\"application/atom+xml\" rel=\"alternate\">\n",
            crate::feed::FEED_FILE
        ));
    }
    if !site.stylesheet.is_empty() {
        out.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">\n",
            site.stylesheet
        ));
    }
    out.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", header.title));
    if !site.title.is_empty() {
        out.push_str(&format!("<header><a href=\"/\">{}</a></header>\n", site.title));
    }
    out.push_str(&format!("<{}>\n", config.footnote.content_host));
    out.push_str("<hgroup id=\"post-header\">\n");
    out.push_str(&format!("<span id=\"date-created\">{created}</span>\n"));
    out.push_str(&format!("<h1>{}</h1>\n", header.title));
    if !header.subtitle.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", header.subtitle));
    }
    out.push_str("</hgroup>\n");

    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        out.push_str(line);
        out.push('\n');
    }

    if let Some(updated) = header.updated.as_deref().and_then(short_date) {
        out.push_str(&format!(
            "<small id=\"{}\">Last Updated on {updated}</small>\n",
            config.footnote.date_marker_id
        ));
    }
    out.push_str(&format!("</{}>\n</body>\n</html>\n", config.footnote.content_host));
    out
}

/// Dated posts, newest first. Equal timestamps keep URL order.
pub fn sort_posts(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| {
        b.header
            .created
            .cmp(&a.header.created)
            .then_with(|| a.url_path.cmp(&b.url_path))
    });
}

fn post_entries(posts: &[PostSummary]) -> String {
    let mut out = String::new();
    for post in posts.iter().filter(|p| !p.header.is_draft()) {
        out.push_str(&format!(
            "<div><dt><b><a href=\"{}\">{}</a></b></dt><dd>{}</dd></div>",
            post.url_path, post.header.title, post.header.subtitle
        ));
    }
    out
}

/// Add the post list to an index page.
///
/// Entries go into an element with id [`POST_LIST_ID`] when the page has
/// one. Otherwise a heading and a new list are appended to the content host,
/// or to the end of the page when there is no host.
pub fn insert_post_list(source: &str, posts: &[PostSummary], config: &Config) -> String {
    let entries = post_entries(posts);
    if entries.is_empty() {
        return source.to_string();
    }

    let mut doc = parse_document(source);
    match doc.find_by_id(POST_LIST_ID) {
        Some(list) => {
            parse_fragment_into(&mut doc, list, &entries);
        }
        None => {
            let host = doc
                .find_first_by_tag(&config.footnote.content_host)
                .unwrap_or_else(|| doc.root());
            let heading = doc.create_element(Element::new("h3"));
            let text = doc.create_text(POST_LIST_HEADING);
            doc.append_child(heading, text);
            doc.append_child(host, heading);
            let list = doc.create_element(Element::new("dl").with_attr("id", POST_LIST_ID));
            doc.append_child(host, list);
            parse_fragment_into(&mut doc, list, &entries);
        }
    }
    doc.to_html()
}
