//! Site rendering
//!
//! Walks a source directory, prerenders every HTML page and mirrors the tree
//! into an output directory. Hidden files and paths listed in a
//! `.siteweaveignore` file (gitignore syntax) are skipped.
//!
//! Pages with a header block are posts: they get the post template, the root
//! `index.html` lists them newest first, and with `[site] url` set they are
//! published in an Atom feed.

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;

use crate::config::Config;
use crate::diagnostics::{count_at_least, Diagnostic, Severity};
use crate::error::{WeaveError, WeaveResult};
use crate::feed::{render_feed, FEED_FILE};
use crate::fs::{copy_file, write_atomic};
use crate::page::{Page, PageOptions};
use crate::post::{self, PostHeader, PostSummary};

/// Per-directory ignore file
pub const IGNORE_FILE: &str = ".siteweaveignore";

/// One prerendered page, not yet written
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub source: PathBuf,
    pub target: PathBuf,
    pub url_path: String,
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
    pub menus: usize,
    pub footnotes: usize,
    pub post: Option<PostHeader>,
}

/// Everything a build would produce
#[derive(Debug, Clone, Default)]
pub struct SitePlan {
    pub pages: Vec<RenderedPage>,
    /// `(source, target)` pairs copied unchanged
    pub assets: Vec<(PathBuf, PathBuf)>,
    /// Dated and draft posts, newest first
    pub posts: Vec<PostSummary>,
    /// `(target, xml)` of the Atom feed
    pub feed: Option<(PathBuf, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub url_path: String,
    pub menus: usize,
    pub footnotes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a site build
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteReport {
    pub pages: Vec<PageReport>,
    pub copied: Vec<PathBuf>,
    pub feed: Option<PathBuf>,
}

impl SiteReport {
    pub fn error_count(&self) -> usize {
        self.pages
            .iter()
            .map(|p| count_at_least(&p.diagnostics, Severity::Error))
            .sum()
    }

    pub fn warning_count(&self) -> usize {
        self.pages
            .iter()
            .map(|p| {
                p.diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count()
            })
            .sum()
    }
}

/// Whether `path` is a page to prerender
pub fn is_page(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}

/// URL path a page is served at, from its path relative to the source root.
///
/// `index.html` maps to its directory.
pub fn url_path(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match parts.split_last() {
        None => "/".to_string(),
        Some((last, dirs)) if last == "index.html" => {
            if dirs.is_empty() {
                "/".to_string()
            } else {
                format!("/{}/", dirs.join("/"))
            }
        }
        Some(_) => format!("/{}", parts.join("/")),
    }
}

/// Page markup before widgets are attached: a post body goes through the
/// template, anything else is returned as is
pub fn prepare_source(source: &str, config: &Config) -> (Option<PostHeader>, String) {
    match post::split_header(source) {
        (Some(header), body) => {
            let html = post::render_template(&header, body, config);
            (Some(header), html)
        }
        (None, _) => (None, source.to_string()),
    }
}

/// Prerender one page from memory
pub fn render_source(source: &str, url_path: &str, config: &Config) -> Page {
    let (_, html) = prepare_source(source, config);
    Page::parse(&html, PageOptions::from_config(config, url_path))
}

/// Prerender one page from disk
pub fn render_file(input: &Path, url_path: &str, config: &Config) -> WeaveResult<Page> {
    let source = fs::read_to_string(input)?;
    Ok(render_source(&source, url_path, config))
}

/// Source files below `source`, relative to it, in a stable order
pub fn discover(source: &Path, output: Option<&Path>) -> WeaveResult<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(WeaveError::DirectoryNotFound {
            path: source.to_path_buf(),
        });
    }

    let skip = output.and_then(|o| o.canonicalize().ok());
    let walker = WalkBuilder::new(source)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .add_custom_ignore_filename(IGNORE_FILE)
        .filter_entry(move |entry| match (&skip, entry.path().canonicalize()) {
            (Some(skip), Ok(path)) => !path.starts_with(skip),
            _ => true,
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| WeaveError::Io(std::io::Error::other(e.to_string())))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(source) {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Render every page below `source` without touching `output`
pub fn plan(source: &Path, output: &Path, config: &Config) -> WeaveResult<SitePlan> {
    let mut plan = SitePlan::default();
    let mut pending = Vec::new();

    for relative in discover(source, Some(output))? {
        let from = source.join(&relative);
        let to = output.join(&relative);

        if !is_page(&relative) {
            plan.assets.push((from, to));
            continue;
        }

        let url = url_path(&relative);
        let (header, html) = prepare_source(&fs::read_to_string(&from)?, config);
        if let Some(header) = &header {
            if url != "/" {
                plan.posts.push(PostSummary {
                    url_path: url.clone(),
                    header: header.clone(),
                });
            }
        }
        pending.push((from, to, url, header, html));
    }
    post::sort_posts(&mut plan.posts);

    for (from, to, url, header, html) in pending {
        let html = if url == "/" {
            post::insert_post_list(&html, &plan.posts, config)
        } else {
            html
        };
        let page = Page::parse(&html, PageOptions::from_config(config, url.as_str()));
        plan.pages.push(RenderedPage {
            source: from,
            target: to,
            url_path: url,
            html: page.render(),
            diagnostics: page.diagnostics(),
            menus: page.menus().len(),
            footnotes: page.footnote_count(),
            post: header,
        });
    }

    plan.feed = render_feed(&config.site, &plan.posts).map(|xml| (output.join(FEED_FILE), xml));
    Ok(plan)
}

/// Render `source` into `output`
pub fn build(source: &Path, output: &Path, config: &Config) -> WeaveResult<SiteReport> {
    let plan = plan(source, output, config)?;
    write_plan(plan)
}

/// Write a plan to disk
pub fn write_plan(plan: SitePlan) -> WeaveResult<SiteReport> {
    let mut report = SiteReport::default();

    for page in plan.pages {
        write_atomic(&page.target, &page.html)?;
        report.pages.push(PageReport {
            source: page.source,
            target: page.target,
            url_path: page.url_path,
            menus: page.menus,
            footnotes: page.footnotes,
            diagnostics: page.diagnostics,
        });
    }

    for (from, to) in plan.assets {
        copy_file(&from, &to)?;
        report.copied.push(to);
    }

    // Written last so it wins over a stale copy in the source tree
    if let Some((target, xml)) = plan.feed {
        write_atomic(&target, &xml)?;
        report.feed = Some(target);
    }
    Ok(report)
}
