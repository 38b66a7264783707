use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::datamodel::{ALL_AUTHORS, ALL_BOOKS};
use crate::error::{Error, Result};

use super::schema::{Author, Book};

/// Exact-match lookup on `id` or `name`.
///
/// A record matches when either supplied field equals its counterpart. Absent
/// fields never match, so an empty lookup finds nothing.
#[derive(Debug, Default, Clone)]
pub struct Lookup {
    pub id: Option<i32>,
    pub name: Option<String>,
}

impl Lookup {
    fn matches(&self, id: i32, name: &str) -> bool {
        self.id == Some(id) || self.name.as_deref() == Some(name)
    }
}

struct Shelf {
    books: Vec<Book>,
    next_id: i32,
}

/// The in-memory authors and books collections.
///
/// Authors are fixed once constructed. Books only grow, through
/// [`Library::add_book`], which assigns ids from a counter that starts past
/// the highest seeded id.
pub struct Library {
    authors: Vec<Author>,
    shelf: RwLock<Shelf>,
    require_known_author: bool,
}

impl Library {
    pub fn new(authors: Vec<Author>, books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().map_or(1, |id| id + 1);
        Self {
            authors,
            shelf: RwLock::new(Shelf { books, next_id }),
            require_known_author: false,
        }
    }

    /// A library holding the static seed dataset.
    pub fn seeded() -> Self {
        let authors = ALL_AUTHORS
            .iter()
            .map(|a| Author {
                id: a.id,
                name: a.name.into(),
            })
            .collect();
        let books = ALL_BOOKS
            .iter()
            .map(|b| Book {
                id: b.id,
                name: b.name.into(),
                author_id: b.author_id,
            })
            .collect();
        Self::new(authors, books)
    }

    /// Makes `add_book` reject author ids that name no author.
    ///
    /// Off by default, in which case `authorId` is a soft reference.
    #[allow(dead_code)]
    pub fn require_known_author(mut self, require: bool) -> Self {
        self.require_known_author = require;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn authors(&self) -> Vec<Author> {
        self.authors.clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.read().books.clone()
    }

    pub fn author(&self, id: i32) -> Option<Author> {
        self.authors.iter().find(|a| a.id == id).cloned()
    }

    pub fn find_author(&self, lookup: &Lookup) -> Option<Author> {
        self.authors
            .iter()
            .find(|a| lookup.matches(a.id, &a.name))
            .cloned()
    }

    pub fn find_book(&self, lookup: &Lookup) -> Option<Book> {
        self.read()
            .books
            .iter()
            .find(|b| lookup.matches(b.id, &b.name))
            .cloned()
    }

    /// Groups the books of the given authors, preserving storage order.
    ///
    /// Every requested author gets an entry, empty if they have no books.
    pub fn books_by_authors(&self, author_ids: &[i32]) -> HashMap<i32, Vec<Book>> {
        let mut grouped: HashMap<i32, Vec<Book>> =
            author_ids.iter().map(|id| (*id, Vec::new())).collect();
        for book in &self.read().books {
            if let Some(books) = grouped.get_mut(&book.author_id) {
                books.push(book.clone());
            }
        }
        grouped
    }

    pub fn add_book(&self, name: String, author_id: i32) -> Result<Book> {
        if self.require_known_author && self.author(author_id).is_none() {
            warn!(author_id, "rejecting book for unknown author");
            return Err(Error::UnknownAuthor(author_id));
        }

        let mut shelf = self.write();
        let book = Book {
            id: shelf.next_id,
            name,
            author_id,
        };
        shelf.next_id += 1;
        shelf.books.push(book.clone());

        info!(id = book.id, name = %book.name, author_id, "added book");
        Ok(book)
    }
}
