use chrono::{TimeZone, Utc};
use loc8r_domain::{radians_to_km, Coords, LocationDraft, OpeningTime, Review};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};

use super::{connect, ensure_indexes, MongoLocationRepo};
use crate::infrastructure::ports::{LocationFields, LocationRepo};

/// MongoDB container plus a repository bound to a fresh database.
struct MongoHarness {
    _container: ContainerAsync<GenericImage>,
    repo: MongoLocationRepo,
}

impl MongoHarness {
    async fn start() -> Self {
        let container = GenericImage::new("mongo", "7.0")
            .with_exposed_port(27017)
            .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
            .start()
            .await;
        let port = container.get_host_port_ipv4(27017).await;

        let db = connect(&format!("mongodb://127.0.0.1:{port}"), "loc8r_test")
            .await
            .expect("connect to mongo");
        ensure_indexes(&db).await.expect("ensure indexes");

        Self {
            _container: container,
            repo: MongoLocationRepo::new(&db),
        }
    }
}

fn draft(name: &str, lng: f64, lat: f64) -> LocationDraft {
    LocationDraft {
        name: name.to_string(),
        address: "High Street".to_string(),
        facilities: vec!["Hot drinks".into(), "Wifi".into()],
        coords: Coords::new(lng, lat),
        opening_times: [
            OpeningTime {
                days: Some("Monday - Friday".into()),
                opening: Some("7:00am".into()),
                closing: Some("7:00pm".into()),
                closed: Some(false),
            },
            OpeningTime {
                days: Some("Sunday".into()),
                closed: Some(true),
                ..OpeningTime::default()
            },
        ],
    }
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn geo_near_returns_radians_nearest_first() {
    let harness = MongoHarness::start().await;
    let repo = &harness.repo;

    repo.create(draft("Close", -0.9700, 51.4560)).await.expect("create close");
    repo.create(draft("Closest", -0.9690884, 51.455041)).await.expect("create closest");
    repo.create(draft("Edinburgh", -3.1883, 55.9533)).await.expect("create far");

    let origin = Coords::new(-0.9690884, 51.455041);
    let matches = repo
        .find_near(origin, 20.0 / 6371.0, 10)
        .await
        .expect("geo near");

    let names: Vec<_> = matches.iter().map(|m| m.location.name.as_str()).collect();
    assert_eq!(names, vec!["Closest", "Close"]);
    assert!(matches.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert!(radians_to_km(matches[1].distance) < 1.0);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn partial_writes_keep_unprojected_fields() {
    let harness = MongoHarness::start().await;
    let repo = &harness.repo;
    let created = repo.create(draft("Starcups", -0.96, 51.45)).await.expect("create");

    let review = Review::new(
        "Simon",
        5,
        "Great coffee",
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
    );
    repo.save_reviews(created.id, &[review.clone()]).await.expect("save reviews");
    repo.save_rating(created.id, 5).await.expect("save rating");

    let mut details = repo
        .get(created.id, LocationFields::WithoutReviews)
        .await
        .expect("get")
        .expect("exists");
    assert!(details.reviews.is_empty());
    assert_eq!(details.rating, None);

    details.name = "Costy".into();
    repo.save_details(&details).await.expect("save details");

    let stored = repo
        .get(created.id, LocationFields::All)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(stored.name, "Costy");
    assert_eq!(stored.rating, Some(5));
    assert_eq!(stored.reviews, vec![review]);
    assert_eq!(stored.opening_times, created.opening_times);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn invalid_coords_are_rejected_by_the_index() {
    let harness = MongoHarness::start().await;

    let err = harness
        .repo
        .create(draft("Nowhere", 500.0, 51.45))
        .await
        .expect_err("2dsphere index rejects out-of-range coords");
    assert_eq!(err.kind_name(), "ValidationError");
}
