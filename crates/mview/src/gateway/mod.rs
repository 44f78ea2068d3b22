//! Remote listing and query operations.
//!
//! The navigation controller only talks to the database through
//! [`FetchGateway`], so the cascade can be driven by an in-memory gateway in
//! tests and by [`MongoGateway`] in the terminal application.

mod mongo;

pub use mongo::MongoGateway;

use crate::error::BrowseError;
use crate::filter::FilterExpression;

pub trait FetchGateway {
    /// Names of all databases, in server order.
    fn list_databases(&mut self) -> Result<Vec<String>, BrowseError>;

    /// Names of the collections in `database`, in server order.
    fn list_collections(&mut self, database: &str) -> Result<Vec<String>, BrowseError>;

    /// Stringified documents matching `filter`. Never more than `limit`.
    fn find_documents(
        &mut self,
        database: &str,
        collection: &str,
        filter: &FilterExpression,
        limit: usize,
    ) -> Result<Vec<String>, BrowseError>;
}

impl<G: FetchGateway + ?Sized> FetchGateway for Box<G> {
    fn list_databases(&mut self) -> Result<Vec<String>, BrowseError> {
        (**self).list_databases()
    }

    fn list_collections(&mut self, database: &str) -> Result<Vec<String>, BrowseError> {
        (**self).list_collections(database)
    }

    fn find_documents(
        &mut self,
        database: &str,
        collection: &str,
        filter: &FilterExpression,
        limit: usize,
    ) -> Result<Vec<String>, BrowseError> {
        (**self).find_documents(database, collection, filter, limit)
    }
}
