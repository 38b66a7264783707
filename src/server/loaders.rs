use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Context;
use tracing::debug;

use super::dataloader::{BatchFuture, BatchLoader, DataLoader};
use super::schema::{Author, Book};
use super::store::Library;

pub trait Loaders {
    fn library(&self) -> &Library;
    async fn load_author(&self, id: i32) -> Option<Author>;
    async fn load_books(&self, author_id: i32) -> Vec<Book>;
    fn forget_books(&self);
}

impl Loaders for Context<'_> {
    fn library(&self) -> &Library {
        self.data_unchecked::<Arc<Library>>()
    }

    async fn load_author(&self, id: i32) -> Option<Author> {
        self.data_unchecked::<DataLoader<LoadAuthors>>()
            .load(id)
            .await
    }

    async fn load_books(&self, author_id: i32) -> Vec<Book> {
        self.data_unchecked::<DataLoader<LoadBooks>>()
            .load(author_id)
            .await
    }

    /// Invalidates the books resolved so far in this request.
    fn forget_books(&self) {
        if let Some(loader) = self.data_opt::<DataLoader<LoadBooks>>() {
            loader.clear();
        }
    }
}

pub struct LoadAuthors {
    library: Arc<Library>,
}

impl LoadAuthors {
    pub fn new(library: Arc<Library>) -> Self {
        Self { library }
    }
}

impl BatchLoader for LoadAuthors {
    type K = i32;
    type V = Option<Author>;

    fn load_batch(&self, keys: Vec<Self::K>) -> BatchFuture<Self::K, Self::V> {
        let library = self.library.clone();
        Box::pin(async move {
            debug!(?keys, "resolving authors");
            let authors: HashMap<_, _> = keys
                .into_iter()
                .map(|id| (id, library.author(id)))
                .collect();
            authors
        })
    }
}

pub struct LoadBooks {
    library: Arc<Library>,
}

impl LoadBooks {
    pub fn new(library: Arc<Library>) -> Self {
        Self { library }
    }
}

impl BatchLoader for LoadBooks {
    type K = i32;
    type V = Vec<Book>;

    fn load_batch(&self, keys: Vec<Self::K>) -> BatchFuture<Self::K, Self::V> {
        let library = self.library.clone();
        Box::pin(async move {
            debug!(?keys, "resolving books by author");
            library.books_by_authors(&keys)
        })
    }
}
