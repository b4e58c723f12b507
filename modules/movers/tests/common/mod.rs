#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use movers::infra::storage::entity::estimate_offer::{self, OfferStatus};
use movers::infra::storage::entity::estimate_request::{self, RequestStatus};
use movers::infra::storage::entity::{like, mover, review};
use movers::MoversConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use serde_json::json;

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()
}

/// Fresh in-memory database, migrated and seeded.
///
/// Movers by experience: m1=10, m2=8, m3=8, m4=5, m5=3, m6=1, m7=0.
/// Stats: m2 has 2 reviews (5, 3), 1 confirmed + 1 pending offer, 2 likes;
/// m4 has 1 review (5); m5 has 1 like. Everyone else is all zeros.
/// Customer c1 likes m2 and m5; c2 likes m2.
/// Pending requests by move date: r2 (Feb), r1 (Mar), r4 (Apr); r3 is confirmed.
pub async fn seeded_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.unwrap();
    movers::migrate(&conn).await.unwrap();
    seed(&conn).await;
    conn
}

pub fn config() -> MoversConfig {
    MoversConfig::default()
}

async fn seed(conn: &DatabaseConnection) {
    let movers = [
        ("m1", 10, json!({"SMALL": true}), json!({"SEOUL": true})),
        ("m2", 8, json!({"SMALL": true}), json!({"SEOUL": true, "BUSAN": false})),
        ("m3", 8, json!({"SMALL": true}), json!({"BUSAN": true})),
        ("m4", 5, json!({"HOME": true}), json!({})),
        ("m5", 3, json!({"SMALL": true}), json!({"INCHEON": true})),
        ("m6", 1, json!({"SMALL": true}), json!({"INCHEON": true})),
        ("m7", 0, json!({"SMALL": true}), json!({"INCHEON": true})),
    ];
    for (day, (id, experience, types, regions)) in (1..).zip(movers) {
        mover::Entity::insert(mover::ActiveModel {
            id: Set(id.to_string()),
            nickname: Set(format!("mover {id}")),
            experience: Set(experience),
            intro: Set(format!("{id} moves things")),
            service_type: Set(types),
            service_region: Set(regions),
            created_at: Set(at(day)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    let requests = [
        ("r1", 3, RequestStatus::Pending),
        ("r2", 2, RequestStatus::Pending),
        ("r3", 1, RequestStatus::Confirmed),
        ("r4", 4, RequestStatus::Pending),
    ];
    for (day, (id, month, status)) in (1..).zip(requests) {
        estimate_request::Entity::insert(estimate_request::ActiveModel {
            id: Set(id.to_string()),
            customer_id: Set("c1".to_string()),
            move_type: Set("HOME".to_string()),
            move_date: Set(Utc.with_ymd_and_hms(2025, month, 1, 9, 0, 0).unwrap()),
            from_address: Set("Seoul".to_string()),
            to_address: Set("Busan".to_string()),
            status: Set(status),
            created_at: Set(at(day)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    let offers = [
        ("o1", "r3", "m2", OfferStatus::Confirmed),
        ("o2", "r1", "m2", OfferStatus::Pending),
    ];
    for (id, request_id, mover_id, status) in offers {
        estimate_offer::Entity::insert(estimate_offer::ActiveModel {
            id: Set(id.to_string()),
            request_id: Set(request_id.to_string()),
            mover_id: Set(mover_id.to_string()),
            price: Set(300_000),
            status: Set(status),
            created_at: Set(at(10)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    let reviews = [("rv1", "m2", 5), ("rv2", "m2", 3), ("rv3", "m4", 5)];
    for (id, mover_id, rating) in reviews {
        review::Entity::insert(review::ActiveModel {
            id: Set(id.to_string()),
            mover_id: Set(mover_id.to_string()),
            customer_id: Set("c1".to_string()),
            rating: Set(rating),
            content: Set("good".to_string()),
            created_at: Set(at(11)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    let likes = [("l1", "m2", "c1"), ("l2", "m5", "c1"), ("l3", "m2", "c2")];
    for (id, mover_id, customer_id) in likes {
        like::Entity::insert(like::ActiveModel {
            id: Set(id.to_string()),
            mover_id: Set(mover_id.to_string()),
            customer_id: Set(customer_id.to_string()),
            created_at: Set(at(12)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }
}
