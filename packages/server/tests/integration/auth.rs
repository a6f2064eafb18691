use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use server::entity::profile;

use crate::common::{PASSWORD, TestApp, routes};

mod sign_up {
    use super::*;

    #[tokio::test]
    async fn creates_a_pending_profile() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 201, "Sign-up failed: {}", res.text);
        assert_eq!(res.body["status"], 201);
        assert_eq!(res.body["data"]["at_handle"], "@phpunit");
        assert_eq!(res.body["data"]["email"], "test@phpunit.de");

        // Exactly one row, pending activation.
        let row = profile::Entity::find()
            .filter(profile::Column::AtHandle.eq("@phpunit"))
            .one(&app.db)
            .await
            .unwrap()
            .expect("profile row missing");
        assert!(row.activation_token.is_some());
        assert_eq!(row.activation_token.as_ref().unwrap().len(), 32);
        assert_eq!(profile::Entity::find().count(&app.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn never_exposes_secret_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        let data = res.body["data"].as_object().unwrap();
        assert!(!data.contains_key("password_hash"));
        assert!(!data.contains_key("activation_token"));
    }

    #[tokio::test]
    async fn rejects_a_taken_handle_with_conflict() {
        let app = TestApp::spawn().await;
        app.register("@phpunit", "test@phpunit.de").await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "other@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(profile::Entity::find().count(&app.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rejects_a_taken_email_with_conflict() {
        let app = TestApp::spawn().await;
        app.register("@phpunit", "test@phpunit.de").await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@someoneelse",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn rejects_password_confirmation_mismatch() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": "different entirely",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(profile::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_a_malformed_email_as_format() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "not-an-email",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(profile::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_an_oversized_handle_as_range() {
        let app = TestApp::spawn().await;
        let long_handle = format!("@{}", "a".repeat(40));

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": long_handle,
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(profile::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_a_handle_without_the_at_sign() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "phpunit",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn rejects_a_short_password_as_range() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "password": "short",
                    "password_confirm": "short",
                }),
            )
            .await;

        assert_eq!(res.status, 422);
    }
}

mod activation {
    use super::*;

    #[tokio::test]
    async fn flips_the_token_to_null() {
        let app = TestApp::spawn().await;
        app.register("@phpunit", "test@phpunit.de").await;

        let row = profile::Entity::find()
            .filter(profile::Column::AtHandle.eq("@phpunit"))
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert!(row.activation_token.is_none());
    }

    #[tokio::test]
    async fn an_unknown_token_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&routes::activate(&"0123456789abcdef".repeat(2)))
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn a_non_hex_token_is_malformed() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::activate(&"z".repeat(32))).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn a_short_token_is_out_of_range() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::activate("abcdef")).await;

        assert_eq!(res.status, 422);
    }
}

mod sign_in {
    use super::*;

    #[tokio::test]
    async fn succeeds_for_an_activated_profile_and_returns_a_token() {
        let app = TestApp::spawn().await;
        app.register("@phpunit", "test@phpunit.de").await;

        let res = app
            .post(
                routes::SIGN_IN,
                &json!({"email": "test@phpunit.de", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "Sign-in failed: {}", res.text);
        assert!(res.jwt.is_some(), "no X-JWT-TOKEN header on sign-in");
        assert_eq!(res.body["data"]["at_handle"], "@phpunit");
    }

    #[tokio::test]
    async fn is_forbidden_before_activation() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;
        assert_eq!(res.status, 201);

        let res = app
            .post(
                routes::SIGN_IN,
                &json!({"email": "test@phpunit.de", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn rejects_a_wrong_password() {
        let app = TestApp::spawn().await;
        app.register("@phpunit", "test@phpunit.de").await;

        let res = app
            .post(
                routes::SIGN_IN,
                &json!({"email": "test@phpunit.de", "password": "wrong password"}),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn rejects_an_unknown_email() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_IN,
                &json!({"email": "ghost@phpunit.de", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn round_trips_the_signed_up_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SIGN_UP,
                &json!({
                    "at_handle": "@phpunit",
                    "email": "test@phpunit.de",
                    "phone": "+1 (555) 010-9999",
                    "avatar_url": "https://cdn.example.com/a.png",
                    "password": PASSWORD,
                    "password_confirm": PASSWORD,
                }),
            )
            .await;
        assert_eq!(res.status, 201);
        let created = res.body["data"].clone();

        let row = profile::Entity::find()
            .filter(profile::Column::AtHandle.eq("@phpunit"))
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let activation = row.activation_token.unwrap();
        assert_eq!(app.get(&routes::activate(&activation)).await.status, 200);

        let token = app.sign_in("test@phpunit.de").await;
        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], created);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ME).await;

        assert_eq!(res.status, 401);
    }
}

mod sign_out {
    use super::*;

    #[tokio::test]
    async fn destroys_the_session() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;

        let res = app.post_with_token(routes::SIGN_OUT, &json!({}), &token).await;
        assert_eq!(res.status, 200);

        let res = app.get_with_token(routes::ME, &token).await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn a_fresh_xsrf_token_is_minted_after_sign_out() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_sign_in("@phpunit", "test@phpunit.de").await;
        let before = app.xsrf_token();

        let res = app.post_with_token(routes::SIGN_OUT, &json!({}), &token).await;
        assert_eq!(res.status, 200);

        let minted = app.refresh_xsrf().await;
        assert!(minted, "expected a fresh XSRF token after sign-out");
        assert_ne!(app.xsrf_token(), before);
    }
}
