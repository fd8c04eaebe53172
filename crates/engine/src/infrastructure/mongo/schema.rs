//! MongoDB index initialization.

use mongodb::{
    bson::{doc, Document},
    Database, IndexModel,
};

use super::LOCATIONS_COLLECTION;

/// Ensure the geospatial index used by proximity search exists.
///
/// Called once on startup. Index creation is idempotent.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let coords_index = IndexModel::builder()
        .keys(doc! { "coords": "2dsphere" })
        .build();

    db.collection::<Document>(LOCATIONS_COLLECTION)
        .create_index(coords_index)
        .await?;

    tracing::info!("MongoDB indexes ensured (locations.coords 2dsphere)");
    Ok(())
}
