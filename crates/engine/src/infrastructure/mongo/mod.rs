//! MongoDB document store implementation.

use mongodb::{Client, Database};

mod documents;
mod location_repo;
mod schema;

#[cfg(test)]
mod integration_tests;

pub use location_repo::MongoLocationRepo;
pub use schema::ensure_indexes;

/// Collection holding location documents.
pub const LOCATIONS_COLLECTION: &str = "locations";

/// Open a client and select the application database.
pub async fn connect(uri: &str, database: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database))
}
