use crate::catalog::CatalogService;
use crate::error::Result;
use syllabuzz_models::Bookmark;

/// Bookmarks fetched per page.
pub const BOOKMARK_PAGE_SIZE: u32 = 12;

/// Incremental loader for the saved-articles list.
pub struct BookmarkPager {
    catalog: CatalogService,
    page_size: u32,
    items: Vec<Bookmark>,
    pages_loaded: u32,
    has_more: bool,
}

impl BookmarkPager {
    pub fn new(catalog: CatalogService) -> Self {
        Self::with_page_size(catalog, BOOKMARK_PAGE_SIZE)
    }

    pub fn with_page_size(catalog: CatalogService, page_size: u32) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
            items: Vec::new(),
            pages_loaded: 0,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    /// Reload from the start, replacing anything already loaded.
    pub async fn first_page(&mut self) -> Result<&[Bookmark]> {
        let page = self.catalog.bookmarks(self.page_size, 0).await?;
        self.items.clear();
        self.pages_loaded = 0;
        self.accept(page);
        Ok(&self.items)
    }

    /// Append the next page. Returns only the newly loaded bookmarks.
    pub async fn next_page(&mut self) -> Result<&[Bookmark]> {
        if !self.has_more {
            return Ok(&[]);
        }
        let skip = self.pages_loaded * self.page_size;
        let page = self.catalog.bookmarks(self.page_size, skip).await?;
        let start = self.items.len();
        self.accept(page);
        Ok(&self.items[start..])
    }

    /// Drop a bookmark locally after it was removed elsewhere.
    pub fn remove(&mut self, article_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|bookmark| bookmark.article.id != article_id);
        before != self.items.len()
    }

    fn accept(&mut self, page: Vec<Bookmark>) {
        self.has_more = page.len() as u32 >= self.page_size;
        self.pages_loaded += 1;
        self.items.extend(page);
    }
}
