use async_graphql::{ComplexObject, Context, Object, SimpleObject};

use super::loaders::Loaders;
use super::store::Lookup;

/// This item represents an author of a book
#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(complex)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[ComplexObject]
impl Author {
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        ctx.load_books(self.id).await
    }
}

/// This item represents a book written by the author
#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(complex)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        ctx.load_author(self.author_id).await
    }
}

pub struct QueryRoot;

/// Root query
#[Object(name = "Query")]
impl QueryRoot {
    /// List of all books
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        ctx.library().books()
    }

    /// One book
    async fn book(&self, ctx: &Context<'_>, id: Option<i32>, name: Option<String>) -> Option<Book> {
        ctx.library().find_book(&Lookup { id, name })
    }

    /// One author
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
        name: Option<String>,
    ) -> Option<Author> {
        ctx.library().find_author(&Lookup { id, name })
    }

    /// List of all authors
    async fn authors(&self, ctx: &Context<'_>) -> Vec<Author> {
        ctx.library().authors()
    }
}

pub struct MutationRoot;

/// Root mutation
#[Object(name = "Mutation")]
impl MutationRoot {
    /// Adds a new book
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        author_id: i32,
    ) -> async_graphql::Result<Book> {
        let book = ctx.library().add_book(name, author_id)?;
        ctx.forget_books();
        Ok(book)
    }
}
