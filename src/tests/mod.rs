use std::sync::Arc;

use cynic::{MutationBuilder as _, QueryBuilder as _};
use reqwest::StatusCode;

use crate::client::{AddBook, BookLookup, Catalog, Client, FindBook, NewBook};
use crate::server::Library;


#[tokio::test]
async fn test_catalog() {
    let server = testserver::Server::seeded();
    let client = Client::new(server.url());

    let catalog = client.run(Catalog::build(())).await.unwrap().data.unwrap();

    let names: Vec<_> = catalog.authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["J. K. Rowling", "J. R. R. Tolkien", "Brent Weeks"]);

    let tolkien: Vec<_> = catalog.authors[1].books.iter().map(|b| b.id).collect();
    assert_eq!(tolkien, [4, 5, 6]);
}

#[tokio::test]
async fn test_add_book() {
    let server = testserver::Server::seeded();
    let client = Client::new(server.url());

    let added = client
        .run(AddBook::build(NewBook {
            name: "Example".into(),
            author_id: 2,
        }))
        .await
        .unwrap()
        .data
        .unwrap()
        .add_book;
    assert_eq!(added.id, 9);
    assert_eq!(added.name, "Example");
    assert_eq!(added.author_id, 2);
    assert_eq!(added.author.unwrap().name, "J. R. R. Tolkien");

    let found = client
        .run(FindBook::build(BookLookup {
            id: None,
            name: Some("Example".into()),
        }))
        .await
        .unwrap()
        .data
        .unwrap()
        .book
        .unwrap();
    assert_eq!(found.id, 9);
}

#[tokio::test]
async fn test_missing_book_is_null() {
    let server = testserver::Server::seeded();
    let client = Client::new(server.url());

    let res = client
        .run(FindBook::build(BookLookup {
            id: Some(999),
            name: None,
        }))
        .await
        .unwrap();
    assert!(res.errors.is_none());
    assert!(res.data.unwrap().book.is_none());
}

#[tokio::test]
async fn test_explorer() {
    let server = testserver::Server::seeded();

    let res = reqwest::get(server.url()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let page = res.text().await.unwrap();
    assert!(page.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_malformed_requests() {
    let server = testserver::Server::seeded();

    let res = post(&server, "{not json").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    for body in [
        r#"{"query": "{ books { "}"#,
        r#"{"query": "mutation { addBook(name: \"Nameless\") { id } }"}"#,
        r#"{"query": "{ nope }"}"#,
    ] {
        let res = post(&server, body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");

        let text = res.text().await.unwrap();
        assert!(text.contains("\"errors\""), "{text}");
    }
}

#[tokio::test]
async fn test_resolver_errors_are_not_bad_requests() {
    let library = Arc::new(Library::seeded().require_known_author(true));
    let server = testserver::Server::start(library.clone());

    let res = post(
        &server,
        r#"{"query": "mutation { addBook(name: \"Orphan\", authorId: 99) { id } }"}"#,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let text = res.text().await.unwrap();
    assert!(text.contains("no author with id 99"), "{text}");
    assert_eq!(library.books().len(), 8);
}

async fn post(server: &testserver::Server, body: &'static str) -> reqwest::Response {
    reqwest::Client::new()
        .post(server.url())
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap()
}
