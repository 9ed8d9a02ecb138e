use anyhow::Result;
use comfy_table::{Cell, Table};
use syllabuzz_models::{Article, Bookmark, Module};

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

pub fn print_articles(articles: &[Article]) -> Result<()> {
    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Source", "Type", "Published", "Relevance"]);
    for article in articles {
        table.add_row(vec![
            Cell::new(&article.id),
            Cell::new(truncate(&article.title, 60)),
            Cell::new(&article.source_name),
            Cell::new(article.article_type.label()),
            Cell::new(article.published_label()),
            Cell::new(
                article
                    .relevance_percent()
                    .map(|percent| format!("{percent}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    print_table(table)
}

pub fn print_modules(modules: &[Module]) -> Result<()> {
    if modules.is_empty() {
        println!("No modules found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Code", "Name", "Keywords"]);
    for module in modules {
        table.add_row(vec![
            Cell::new(&module.id),
            Cell::new(&module.code),
            Cell::new(&module.name),
            Cell::new(truncate(&module.keywords.join(", "), 40)),
        ]);
    }
    print_table(table)
}

pub fn print_bookmarks(bookmarks: &[Bookmark]) -> Result<()> {
    if bookmarks.is_empty() {
        println!("No saved articles yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Article", "Title", "Source", "Saved"]);
    for bookmark in bookmarks {
        table.add_row(vec![
            Cell::new(&bookmark.article.id),
            Cell::new(truncate(&bookmark.article.title, 60)),
            Cell::new(&bookmark.article.source_name),
            Cell::new(
                bookmark
                    .created_at
                    .as_deref()
                    .map(syllabuzz_models::format_date)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    print_table(table)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title here", 10), "a longe...");
    }
}
