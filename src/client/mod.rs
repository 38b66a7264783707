use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn run<Op, Input>(
        &self,
        op: cynic::Operation<Op, Input>,
    ) -> Result<cynic::GraphQlResponse<Op>, CynicReqwestError>
    where
        Input: serde::Serialize,
        Op: serde::de::DeserializeOwned + 'static,
    {
        self.client.post(self.url.clone()).run_graphql(op).await
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Catalog {
    pub authors: Vec<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub books: Vec<Title>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Book")]
pub struct Title {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
    pub author: Option<AuthorName>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct AuthorName {
    pub name: String,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct BookLookup {
    pub id: Option<i32>,
    pub name: Option<String>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "BookLookup")]
pub struct FindBook {
    #[arguments(id: $id, name: $name)]
    pub book: Option<Book>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct NewBook {
    pub name: String,
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "NewBook")]
pub struct AddBook {
    #[arguments(name: $name, authorId: $author_id)]
    pub add_book: Book,
}
