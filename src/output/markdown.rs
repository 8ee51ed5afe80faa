//! Markdown rendering of page records
//!
//! This module renders a normalized page view as a markdown document, with
//! the same sections as the detail view: header, content, links, summary,
//! insights and metadata. Content is already markdown and is embedded as-is.

use crate::model::{Link, PageView};
use crate::LensError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a page view as markdown to a file
///
/// # Arguments
///
/// * `view` - The normalized page record
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(LensError)` - Failed to create or write the file
pub fn export_page_markdown(view: &PageView, output_path: &Path) -> Result<(), LensError> {
    let markdown = format_page_markdown(view);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a page view as markdown
///
/// Optional sections are omitted when the record has nothing for them:
/// links and metadata when the backend sent none, insights when empty.
pub fn format_page_markdown(view: &PageView) -> String {
    let mut md = String::new();

    // Header
    md.push_str(&format!("# {}\n\n", view.title));
    md.push_str(&format!("- **Crawled at**: {}\n", view.crawled_at));
    md.push_str(&format!("- **URL**: <{}>\n", view.url));
    md.push_str(&format!("- **ID**: {}\n", view.id));
    if let Some(category) = &view.category {
        md.push_str(&format!("- **Category**: {}\n", category));
    }
    if let Some(sentiment) = &view.sentiment {
        md.push_str(&format!("- **Sentiment**: {}\n", sentiment));
    }
    md.push('\n');

    // Content
    md.push_str("## Content\n\n");
    md.push_str(view.content.trim_end());
    md.push_str("\n\n");

    // Links
    if let Some(links) = &view.links {
        md.push_str("## Links\n\n");
        push_link_section(&mut md, "Internal Links", &links.internal);
        push_link_section(&mut md, "External Links", &links.external);
    }

    // Summary
    md.push_str("## Summary\n\n");
    md.push_str(&view.summary);
    md.push_str("\n\n");

    // Insights
    if !view.insights.is_empty() {
        md.push_str("## Insights\n\n");
        for insight in &view.insights {
            md.push_str(&format!("- {}\n", insight));
        }
        md.push('\n');
    }

    // Metadata
    if let Some(metadata) = &view.metadata {
        md.push_str("## Metadata\n\n");
        md.push_str("| Key | Value |\n");
        md.push_str("|-----|-------|\n");
        for (key, value) in metadata.entries() {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(key),
                escape_cell(&value)
            ));
        }
        md.push('\n');
    }

    md
}

/// Renders one link as a markdown list item
pub fn format_link(link: &Link) -> String {
    let mut item = format!("- [{}]({})", link.display_text(), link.href);
    if let Some(origin) = link.origin() {
        item.push_str(&format!(" ({})", origin));
    }
    item
}

fn push_link_section(md: &mut String, heading: &str, links: &[Link]) {
    if links.is_empty() {
        return;
    }

    md.push_str(&format!("### {}\n\n", heading));
    for link in links {
        md.push_str(&format_link(link));
        md.push('\n');
    }
    md.push('\n');
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
