use std::fmt;
use std::future::{Future, IntoFuture};
use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tokio::runtime::Handle;
use tracing::{debug, info};

use super::FetchGateway;
use crate::config::ConnectionConfig;
use crate::error::BrowseError;
use crate::filter::FilterExpression;
use crate::util::{document_to_line, format_mongo_error};

/// [`FetchGateway`] backed by the async MongoDB driver.
///
/// Each call blocks the calling thread on the runtime, so it must not be used
/// from inside an async context.
pub struct MongoGateway {
    client: Client,
    rt: Handle,
    query_timeout: Option<Duration>,
}

impl MongoGateway {
    /// Connect to `uri` and verify the deployment answers within the
    /// configured connect timeout.
    pub fn connect(rt: Handle, uri: &str, config: &ConnectionConfig) -> Result<Self, BrowseError> {
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs.max(1));
        let query_timeout =
            (config.query_timeout_secs > 0).then(|| Duration::from_secs(config.query_timeout_secs));

        let client = rt.block_on(async {
            let mut options = ClientOptions::parse(uri)
                .await
                .map_err(|e| BrowseError::Connection(format_mongo_error(&e)))?;
            options.app_name.get_or_insert_with(|| "mview".to_string());
            options.connect_timeout = Some(connect_timeout);
            options.server_selection_timeout = Some(connect_timeout);

            let client = Client::with_options(options)
                .map_err(|e| BrowseError::Connection(format_mongo_error(&e)))?;

            // The driver connects lazily; force a round trip now.
            match tokio::time::timeout(connect_timeout, client.list_database_names()).await {
                Ok(Ok(_)) => Ok(client),
                Ok(Err(e)) => Err(BrowseError::Connection(format_mongo_error(&e))),
                Err(_) => Err(BrowseError::Connection(format!(
                    "no response within {}s",
                    connect_timeout.as_secs()
                ))),
            }
        })?;

        info!(timeout_secs = connect_timeout.as_secs(), "connected to MongoDB");

        Ok(Self {
            client,
            rt,
            query_timeout,
        })
    }

    fn run<T, F>(&self, what: &str, fut: F) -> Result<T, BrowseError>
    where
        F: Future<Output = Result<T, mongodb::error::Error>>,
    {
        let query_timeout = self.query_timeout;
        self.rt.block_on(async move {
            let result = match query_timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => {
                        return Err(BrowseError::remote(format!(
                            "{what} timed out after {}s",
                            limit.as_secs()
                        )))
                    }
                },
                None => fut.await,
            };
            result.map_err(|e| BrowseError::remote(format_mongo_error(&e)))
        })
    }
}

impl fmt::Debug for MongoGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoGateway")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl FetchGateway for MongoGateway {
    fn list_databases(&mut self) -> Result<Vec<String>, BrowseError> {
        debug!("listing databases");
        self.run("listing databases", self.client.list_database_names().into_future())
    }

    fn list_collections(&mut self, database: &str) -> Result<Vec<String>, BrowseError> {
        debug!(database, "listing collections");
        let db = self.client.database(database);
        self.run("listing collections", db.list_collection_names().into_future())
    }

    fn find_documents(
        &mut self,
        database: &str,
        collection: &str,
        filter: &FilterExpression,
        limit: usize,
    ) -> Result<Vec<String>, BrowseError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        debug!(database, collection, filter = %filter.label(), limit, "finding documents");

        let coll = self.client.database(database).collection::<Document>(collection);
        let query = filter.to_query();
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);

        let docs: Vec<Document> = self.run("find", async move {
            let cursor = coll.find(query).limit(limit_i64).await?;
            cursor.try_collect().await
        })?;

        Ok(docs.into_iter().take(limit).map(document_to_line).collect())
    }
}
