use hbnb::{Entity, ErrorKind, Fields, HbnbFacade};
use serde_json::{json, Value};
use std::thread;

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_concurrent_same_email_creates_exactly_one_user() {
    let facade = HbnbFacade::new();
    let threads = 16;

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let facade = &facade;
                scope.spawn(move || {
                    facade.create_user(&fields(json!({
                        "first_name": format!("User{}", i),
                        "last_name": "Race",
                        "email": "race@example.com"
                    })))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(result.as_ref().unwrap_err().kind(), ErrorKind::DuplicateKey);
    }
    assert_eq!(facade.get_all_users().len(), 1);
}

#[test]
fn test_concurrent_reviews_all_attach_once() {
    let facade = HbnbFacade::new();
    let user = facade
        .create_user(&fields(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "email": "ann@example.com"
        })))
        .unwrap();
    let user_id = user.read().id().to_string();
    let place = facade
        .create_place(&fields(json!({
            "title": "Busy place",
            "price": 99,
            "latitude": 12.5,
            "longitude": -4.25,
            "owner_id": user_id
        })))
        .unwrap();
    let place_id = place.read().id().to_string();

    thread::scope(|scope| {
        for i in 0..32 {
            let facade = &facade;
            let user_id = &user_id;
            let place_id = &place_id;
            scope.spawn(move || {
                facade
                    .create_review(&fields(json!({
                        "text": format!("Review {}", i),
                        "rating": (i % 5) + 1,
                        "user_id": user_id,
                        "place_id": place_id
                    })))
                    .unwrap();
            });
        }
    });

    assert_eq!(place.read().reviews().len(), 32);
    assert_eq!(facade.get_reviews_by_place(&place_id).unwrap().len(), 32);

    let mut ids: Vec<String> = place
        .read()
        .reviews()
        .iter()
        .map(|r| r.read().id().to_string())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[test]
fn test_facade_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HbnbFacade>();
}
