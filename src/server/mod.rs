use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Request, Response, Schema, Value};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

mod dataloader;
mod loaders;
mod schema;
mod store;

use dataloader::DataLoader;
use loaders::{LoadAuthors, LoadBooks};
use schema::{MutationRoot, QueryRoot};
pub use store::Library;

type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The executable schema, bound to one [`Library`].
#[derive(Clone)]
pub struct GraphQL {
    schema: LibrarySchema,
    library: Arc<Library>,
}

impl GraphQL {
    pub fn new(library: Arc<Library>) -> Self {
        let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(library.clone())
            .finish();
        Self { schema, library }
    }

    #[cfg(test)]
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Executes a request with a fresh set of data loaders driving it.
    pub async fn execute(&self, req: impl Into<Request>) -> Response {
        let load_authors = DataLoader::new(LoadAuthors::new(self.library.clone()));
        let load_books = DataLoader::new(LoadBooks::new(self.library.clone()));
        let req: Request = req.into();
        let req = req
            .data(load_authors.clone())
            .data(load_books.clone());

        let execute = self.schema.execute(req);
        load_authors.wrap(load_books.wrap(execute)).await
    }
}

/// Whether the request was rejected before any resolver ran, i.e. it failed
/// to parse or validate.
///
/// Resolver errors carry the path of the failing field and are not counted.
fn is_request_error(resp: &Response) -> bool {
    resp.data == Value::Null
        && !resp.errors.is_empty()
        && resp.errors.iter().all(|err| err.path.is_empty())
}

#[derive(Clone)]
struct AppState {
    graphql: GraphQL,
    endpoint: Arc<str>,
}

async fn graphiql(State(state): State<AppState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.endpoint).finish())
}

#[axum::debug_handler]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> impl IntoResponse {
    let resp = state.graphql.execute(req.into_inner()).await;
    let status = if is_request_error(&resp) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, GraphQLResponse::from(resp))
}

pub fn make_app(config: &Config, library: Arc<Library>) -> Router {
    let state = AppState {
        graphql: GraphQL::new(library),
        endpoint: config.endpoint.as_str().into(),
    };

    Router::new()
        .route(&config.endpoint, get(graphiql).post(graphql_handler))
        .with_state(state)
}

pub async fn serve(config: &Config) -> Result<()> {
    let app = make_app(config, Arc::new(Library::seeded()));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(|source| Error::Bind {
            addr: config.listen,
            source,
        })?;
    info!("server is running on {}", config.listen.port());

    axum::serve(listener, app).await.map_err(Error::Serve)
}
