use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use server::entity::tweet;

use crate::common::{TestApp, routes};

async fn post_tweet(app: &TestApp, token: &str, content: &str) -> uuid::Uuid {
    let res = app
        .post_with_token(routes::TWEETS, &json!({"content": content}), token)
        .await;
    assert_eq!(res.status, 201, "Posting tweet failed: {}", res.text);
    res.body["data"]["id"].as_str().unwrap().parse().unwrap()
}

mod create {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_the_store() {
        let app = TestApp::spawn().await;
        let (profile_id, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(routes::TWEETS, &json!({"content": "hello world"}), &token)
            .await;
        assert_eq!(res.status, 201);
        let created = res.body["data"].clone();
        assert_eq!(created["profile_id"], profile_id.to_string());
        assert_eq!(created["content"], "hello world");

        let id: uuid::Uuid = created["id"].as_str().unwrap().parse().unwrap();
        let res = app.get(&routes::tweet(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], created);
    }

    #[tokio::test]
    async fn accepts_a_client_supplied_timestamp() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(
                routes::TWEETS,
                &json!({"content": "backdated", "created_at": "2024-01-02 13:45:09.250000"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        // Epoch milliseconds for 2024-01-02T13:45:09.250Z.
        assert_eq!(res.body["data"]["created_at"], 1_704_203_109_250_i64);
    }

    #[tokio::test]
    async fn rejects_141_characters_as_range_with_zero_rows_written() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(routes::TWEETS, &json!({"content": "x".repeat(141)}), &token)
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(tweet::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_whitespace_only_content_as_format() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(routes::TWEETS, &json!({"content": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn rejects_an_impossible_date_as_range() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(
                routes::TWEETS,
                &json!({"content": "fine", "created_at": "2024-13-01 00:00:00"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 422);
    }

    #[tokio::test]
    async fn rejects_a_malformed_date_as_format() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .post_with_token(
                routes::TWEETS,
                &json!({"content": "fine", "created_at": "01/02/2024"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn newest_first_with_pagination() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        for (content, at) in [
            ("oldest", "2024-01-01 08:00:00"),
            ("middle", "2024-01-02 08:00:00"),
            ("newest", "2024-01-03 08:00:00"),
        ] {
            let res = app
                .post_with_token(
                    routes::TWEETS,
                    &json!({"content": content, "created_at": at}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 201);
        }

        let res = app
            .get(&format!("{}?per_page=2&page=1", routes::TWEETS))
            .await;
        assert_eq!(res.status, 200);
        let page = res.body["data"]["data"].as_array().unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["content"], "newest");
        assert_eq!(page[1]["content"], "middle");
        assert_eq!(res.body["data"]["pagination"]["total"], 3);
        assert_eq!(res.body["data"]["pagination"]["total_pages"], 2);

        let res = app
            .get(&format!("{}?per_page=2&page=2", routes::TWEETS))
            .await;
        let page = res.body["data"]["data"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content"], "oldest");
    }

    #[tokio::test]
    async fn filters_by_content_substring() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;
        post_tweet(&app, &token, "the quick brown fox").await;
        post_tweet(&app, &token, "lazy dog").await;

        let res = app.get(&format!("{}?search=BROWN", routes::TWEETS)).await;

        assert_eq!(res.status, 200);
        let page = res.body["data"]["data"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content"], "the quick brown fox");
    }

    #[tokio::test]
    async fn an_unmatched_search_is_an_empty_collection_not_an_error() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;
        post_tweet(&app, &token, "something").await;

        let res = app.get(&format!("{}?search=nomatch", routes::TWEETS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["data"].as_array().unwrap().len(), 0);
        assert_eq!(res.body["data"]["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn filters_by_date_range() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        for (content, at) in [
            ("before", "2024-01-01 08:00:00"),
            ("inside", "2024-02-15 08:00:00"),
            ("after", "2024-04-01 08:00:00"),
        ] {
            let res = app
                .post_with_token(
                    routes::TWEETS,
                    &json!({"content": content, "created_at": at}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 201);
        }

        let res = app
            .get(&format!("{}?from=2024-02-01&to=2024-03-01", routes::TWEETS))
            .await;

        assert_eq!(res.status, 200);
        let page = res.body["data"]["data"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content"], "inside");
    }

    #[tokio::test]
    async fn filters_by_author() {
        let app = TestApp::spawn().await;
        let (alice, alice_token) = app.register_and_sign_in("@alice", "alice@phpunit.de").await;
        post_tweet(&app, &alice_token, "from alice").await;
        let (_, bob_token) = app.register_and_sign_in("@bob", "bob@phpunit.de").await;
        post_tweet(&app, &bob_token, "from bob").await;

        let res = app
            .get(&format!("{}?profile_id={}", routes::TWEETS, alice))
            .await;

        assert_eq!(res.status, 200);
        let page = res.body["data"]["data"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content"], "from alice");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn edits_own_content_after_revalidation() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;
        let id = post_tweet(&app, &token, "original").await;

        let res = app
            .put_with_token(&routes::tweet(id), &json!({"content": "edited"}), &token)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["content"], "edited");

        let res = app
            .put_with_token(&routes::tweet(id), &json!({"content": "y".repeat(141)}), &token)
            .await;
        assert_eq!(res.status, 422);
    }

    #[tokio::test]
    async fn cannot_edit_someone_elses_tweet() {
        let app = TestApp::spawn().await;
        let (_, alice_token) = app.register_and_sign_in("@alice", "alice@phpunit.de").await;
        let id = post_tweet(&app, &alice_token, "alice's").await;
        let (_, bob_token) = app.register_and_sign_in("@bob", "bob@phpunit.de").await;

        let res = app
            .put_with_token(&routes::tweet(id), &json!({"content": "bob's now"}), &bob_token)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn updating_a_missing_tweet_is_not_found() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .put_with_token(
                &routes::tweet(uuid::Uuid::new_v4()),
                &json!({"content": "ghost"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_the_tweet_and_its_dependents() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;
        let id = post_tweet(&app, &token, "doomed").await;

        let res = app
            .post_with_token(routes::LIKES, &json!({"tweet_id": id}), &token)
            .await;
        assert_eq!(res.status, 201);
        let res = app
            .post_with_token(
                routes::IMAGES,
                &json!({
                    "tweet_id": id,
                    "storage_token": "cloudinary:v1/abc",
                    "url": "https://cdn.example.com/abc.png",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);

        let res = app.delete_with_token(&routes::tweet(id), &token).await;
        assert_eq!(res.status, 200);

        assert_eq!(app.get(&routes::tweet(id)).await.status, 404);
        assert_eq!(
            server::entity::like::Entity::find()
                .count(&app.db)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            server::entity::image::Entity::find()
                .count(&app.db)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_tweet_is_not_found() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app
            .delete_with_token(&routes::tweet(uuid::Uuid::new_v4()), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}
