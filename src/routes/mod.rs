pub mod admin;
pub mod auth;
pub mod categories;
pub mod episodes;
pub mod health;
pub mod movies;
pub mod notifications;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Build the full application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints
        .route("/", get(health::root))
        .route("/api/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        // Content endpoints
        .route(
            "/api/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/api/movies/search-suggestions",
            get(movies::search_suggestions),
        )
        .route("/api/movies/series", get(movies::list_series))
        .route("/api/movies/related/:id", get(movies::related))
        .route(
            "/api/movies/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/api/movies/:id/download", post(movies::record_download))
        .route(
            "/api/movies/:id/toggle-active",
            patch(movies::toggle_active),
        )
        .route(
            "/api/movies/:id/toggle-trending",
            patch(movies::toggle_trending),
        )
        .route(
            "/api/movies/:id/toggle-featured",
            patch(movies::toggle_featured),
        )
        // Episode endpoints
        .route(
            "/api/movies/:id/episodes",
            get(episodes::list_episodes).post(episodes::add_episode),
        )
        .route(
            "/api/movies/:id/episodes/:episode_id",
            patch(episodes::update_episode).delete(episodes::delete_episode),
        )
        // Taxonomy
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/stats", get(categories::category_stats))
        // Admin endpoints (protected by ADMIN_KEY)
        .route("/api/admin/verify", get(admin::verify))
        .route("/api/admin/movies", get(admin::list_all))
        .route("/api/admin/movies/:id", get(admin::get_raw))
        // Notification inbox
        .route(
            "/api/admin/notifications",
            get(notifications::list).post(notifications::submit),
        )
        .route(
            "/api/admin/notifications/settings",
            get(notifications::get_settings).put(notifications::put_settings),
        )
        .route("/api/admin/notifications/reply", post(notifications::reply))
        .route(
            "/api/admin/notifications/:id",
            axum::routing::delete(notifications::delete),
        )
        .route(
            "/api/admin/notifications/:id/read",
            patch(notifications::mark_read),
        )
        .route(
            "/api/admin/notifications/:id/replies",
            get(notifications::replies),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::MemoryContentStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "admin123";

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(
            Config::default(),
            Arc::new(MemoryContentStore::new()),
        ));
        router(state)
    }

    /// Send a request and decode the JSON body (Null when empty or not JSON)
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        admin: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if admin {
            builder = builder.header(auth::ADMIN_KEY_HEADER, KEY);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    fn movie(title: &str) -> Value {
        json!({
            "title": title,
            "language": "Telugu",
            "category": "Movie",
            "genre": ["Action"],
            "year": 2023,
            "posterUrl": "https://img.example.com/p.jpg",
            "description": "An action film",
            "fileSize": "1GB",
            "downloadLinks": [
                { "quality": "720p", "url": "https://drive.google.com/file/d/ABC123/view" }
            ]
        })
    }

    fn series(title: &str, episodes: &[u32]) -> Value {
        let episodes: Vec<Value> = episodes
            .iter()
            .map(|n| {
                json!({
                    "episodeNumber": n,
                    "title": format!("Episode {}", n),
                    "downloadLinks": [{ "quality": "480p", "url": "https://cdn.example.com/e.mkv" }]
                })
            })
            .collect();

        json!({
            "title": title,
            "language": "Hindi",
            "category": "Web Series",
            "genre": ["Drama"],
            "year": 2022,
            "posterUrl": "https://img.example.com/s.jpg",
            "description": "A drama series",
            "fileSize": "ignored for series",
            "episodes": episodes
        })
    }

    async fn create(app: &Router, body: Value) -> String {
        let (status, json) = send(app, "POST", "/api/movies", Some(body), true).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app();

        let (status, json) = send(&app, "GET", "/api/health", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"]["backend"], "memory");

        let (status, _) = send(&app, "GET", "/ready", None, false).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_key_required() {
        let app = test_app();

        let (status, json) = send(&app, "POST", "/api/movies", Some(movie("X")), false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid or missing admin key");

        let (status, _) = send(&app, "GET", "/api/admin/verify?key=wrong", None, false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = send(&app, "GET", "/api/admin/verify?key=admin123", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["valid"], true);
    }

    #[tokio::test]
    async fn test_create_movie_stores_direct_link() {
        let app = test_app();
        let id = create(&app, movie("X")).await;

        let (status, json) = send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "Movie");
        assert_eq!(json["fileSize"], "1GB");
        assert_eq!(
            json["downloadLinks"][0]["url"],
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
        assert!(json.get("episodes").is_none());
        assert!(json.get("seasons").is_none());
        assert_eq!(json["downloadCount"], 0);
    }

    #[tokio::test]
    async fn test_create_series_strips_file_size() {
        let app = test_app();
        let id = create(&app, series("S", &[1, 2])).await;

        let (_, json) = send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        assert!(json.get("fileSize").is_none());
        assert!(json.get("downloadLinks").is_none());
        assert_eq!(json["seasons"], 1);
        assert_eq!(json["currentSeason"], 1);
        assert_eq!(json["episodes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_series_without_episodes_rejected() {
        let app = test_app();
        let mut body = series("S", &[]);
        body["episodes"] = json!([]);

        let (status, _) = send(&app, "POST", "/api/movies", Some(body), true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = send(&app, "GET", "/api/admin/movies", None, true).await;
        assert_eq!(json["total"], 0);
    }

    #[tokio::test]
    async fn test_update_to_series_without_episodes_fails() {
        let app = test_app();
        let id = create(&app, movie("X")).await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/movies/{}", id),
            Some(json!({ "category": "Web Series" })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        assert_eq!(json["category"], "Movie");
        assert_eq!(json["fileSize"], "1GB");
    }

    #[tokio::test]
    async fn test_update_movie_to_series_drops_movie_fields() {
        let app = test_app();
        let id = create(&app, movie("X")).await;

        let mut body = series("X", &[1]);
        body["downloadLinks"] = json!([{ "quality": "720p", "url": "https://a.example.com" }]);
        let (status, json) = send(&app, "PUT", &format!("/api/movies/{}", id), Some(body), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "Web Series");
        assert!(json.get("fileSize").is_none());
        assert!(json.get("downloadLinks").is_none());
        assert_eq!(json["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_download_counter_increments_by_call() {
        let app = test_app();
        let id = create(&app, movie("X")).await;
        let uri = format!("/api/movies/{}/download", id);

        let (_, first) = send(&app, "POST", &uri, None, false).await;
        let (_, second) = send(&app, "POST", &uri, None, false).await;
        assert_eq!(first["downloadCount"], 1);
        assert_eq!(second["downloadCount"], 2);

        // reads never count
        send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        let (_, json) = send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        assert_eq!(json["downloadCount"], 2);

        let (status, _) = send(&app, "POST", "/api/movies/nope/download", None, false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_excludes_inactive() {
        let app = test_app();
        for i in 0..3 {
            create(&app, movie(&format!("active {}", i))).await;
        }
        for i in 0..2 {
            let id = create(&app, movie(&format!("hidden {}", i))).await;
            let (status, json) = send(
                &app,
                "PATCH",
                &format!("/api/movies/{}/toggle-active", id),
                None,
                true,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["isActive"], false);
        }

        let (status, json) = send(&app, "GET", "/api/movies?language=Telugu", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);

        let (_, json) = send(&app, "GET", "/api/admin/movies", None, true).await;
        assert_eq!(json["total"], 5);
        let (_, json) = send(&app, "GET", "/api/admin/movies?isActive=false", None, true).await;
        assert_eq!(json["total"], 2);
    }

    #[tokio::test]
    async fn test_pagination() {
        let app = test_app();
        for i in 1..=5 {
            create(&app, movie(&format!("m{}", i))).await;
        }

        let (_, page1) = send(&app, "GET", "/api/movies?limit=2&page=1", None, false).await;
        assert_eq!(page1["items"].as_array().unwrap().len(), 2);
        assert_eq!(page1["items"][0]["title"], "m5");
        assert_eq!(page1["items"][1]["title"], "m4");

        let (_, page3) = send(&app, "GET", "/api/movies?limit=2&page=3", None, false).await;
        assert_eq!(page3["items"].as_array().unwrap().len(), 1);
        assert_eq!(page3["items"][0]["title"], "m1");

        let (status, page4) = send(&app, "GET", "/api/movies?limit=2&page=4", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page4["items"].as_array().unwrap().is_empty());
        assert_eq!(page4["total"], 5);
        assert_eq!(page4["pages"], 3);
        assert_eq!(page4["page"], 4);

        let (status, far) = send(&app, "GET", "/api/movies?limit=100&page=100000000000000000", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(far["items"].as_array().unwrap().is_empty());
        assert_eq!(far["total"], 5);
    }

    #[tokio::test]
    async fn test_empty_listing_and_odd_filters() {
        let app = test_app();
        create(&app, movie("X")).await;

        let (_, json) = send(&app, "GET", "/api/movies?genre=Western", None, false).await;
        assert_eq!(json["total"], 0);
        assert_eq!(json["pages"], 0);
        assert!(json["items"].as_array().unwrap().is_empty());

        let (status, json) = send(&app, "GET", "/api/movies?year=abc", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 0);

        let (_, json) = send(&app, "GET", "/api/movies?search=ACTION%20FILM", None, false).await;
        assert_eq!(json["total"], 1);
    }

    #[tokio::test]
    async fn test_series_list_and_summary_shape() {
        let app = test_app();
        create(&app, movie("M")).await;
        create(&app, series("S", &[1])).await;

        let (_, json) = send(&app, "GET", "/api/movies/series", None, false).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0]["title"], "S");
        assert_eq!(json["items"][0]["seasons"], 1);
        assert!(json["items"][0].get("episodes").is_none());
    }

    #[tokio::test]
    async fn test_suggestions_and_related() {
        let app = test_app();
        let a = create(&app, movie("Pushpa")).await;
        create(&app, movie("Pushpa 2")).await;
        create(&app, series("Other", &[1])).await;

        let (status, json) = send(&app, "GET", "/api/movies/search-suggestions?q=p", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));

        let (_, json) = send(&app, "GET", "/api/movies/search-suggestions?q=push", None, false).await;
        assert_eq!(json.as_array().unwrap().len(), 2);

        let (_, json) = send(&app, "GET", &format!("/api/movies/related/{}", a), None, false).await;
        let related = json.as_array().unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0]["title"], "Pushpa 2");
    }

    #[tokio::test]
    async fn test_episode_lifecycle() {
        let app = test_app();
        let id = create(&app, series("S", &[1, 2])).await;
        let episodes_uri = format!("/api/movies/{}/episodes", id);

        // duplicate number
        let dup = json!({
            "episodeNumber": 2,
            "title": "Again",
            "downloadLinks": [{ "quality": "720p", "url": "https://cdn.example.com/x" }]
        });
        let (status, json) = send(&app, "POST", &episodes_uri, Some(dup), true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Episode 2 already exists");

        // missing links
        let (status, _) = send(
            &app,
            "POST",
            &episodes_uri,
            Some(json!({ "episodeNumber": 3, "title": "Three" })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // valid add with a share link
        let third = json!({
            "episodeNumber": 3,
            "title": "Three",
            "duration": "45 min",
            "downloadLinks": [{ "quality": "1080p", "url": "https://drive.google.com/open?id=EP3" }]
        });
        let (status, added) = send(&app, "POST", &episodes_uri, Some(third), true).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            added["downloadLinks"][0]["url"],
            "https://drive.google.com/uc?export=download&id=EP3"
        );
        let episode_id = added["id"].as_str().unwrap().to_string();

        // hide it
        let (status, patched) = send(
            &app,
            "PATCH",
            &format!("{}/{}", episodes_uri, episode_id),
            Some(json!({ "isActive": false })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["isActive"], false);
        assert_eq!(patched["title"], "Three");
        assert_eq!(patched["duration"], "45 min");

        let (_, listing) = send(&app, "GET", &episodes_uri, None, false).await;
        let numbers: Vec<i64> = listing["episodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["episodeNumber"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(listing["seriesTitle"], "S");

        // still visible to admins
        let (_, raw) = send(&app, "GET", &format!("/api/admin/movies/{}", id), None, true).await;
        assert_eq!(raw["episodes"].as_array().unwrap().len(), 3);

        // public detail hides it
        let (_, public) = send(&app, "GET", &format!("/api/movies/{}", id), None, false).await;
        assert_eq!(public["episodes"].as_array().unwrap().len(), 2);

        // delete, then delete again
        let uri = format!("{}/{}", episodes_uri, episode_id);
        let (status, _) = send(&app, "DELETE", &uri, None, true).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &uri, None, true).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "PATCH",
            &uri,
            Some(json!({ "title": "gone" })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_episodes_of_movie_rejected() {
        let app = test_app();
        let id = create(&app, movie("X")).await;

        let (status, json) = send(&app, "GET", &format!("/api/movies/{}/episodes", id), None, false).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "This content is not a series");

        let add = json!({
            "episodeNumber": 1,
            "title": "One",
            "downloadLinks": [{ "quality": "720p", "url": "https://cdn.example.com/x" }]
        });
        let (status, _) = send(&app, "POST", &format!("/api/movies/{}/episodes", id), Some(add), true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // a movie has no episodes to update or delete
        let uri = format!("/api/movies/{}/episodes/{}", id, uuid::Uuid::new_v4());
        let (status, json) = send(&app, "PATCH", &uri, Some(json!({ "title": "t" })), true).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Episode not found");

        let (status, _) = send(&app, "DELETE", &uri, None, true).await;
        assert_eq!(status, StatusCode::OK);

        let (_, raw) = send(&app, "GET", &format!("/api/admin/movies/{}", id), None, true).await;
        assert_eq!(raw["fileSize"], "1GB");
    }

    #[tokio::test]
    async fn test_delete_movie() {
        let app = test_app();
        let id = create(&app, movie("X")).await;
        let uri = format!("/api/movies/{}", id);

        let (status, _) = send(&app, "DELETE", &uri, None, true).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &uri, None, true).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "GET", &uri, None, false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_categories() {
        let app = test_app();
        create(&app, movie("X")).await;
        create(&app, series("S", &[1])).await;

        let (_, json) = send(&app, "GET", "/api/categories", None, false).await;
        assert_eq!(json["categories"], json!(["Movie", "Web Series", "TV Series", "Dubbed"]));
        assert_eq!(json["qualities"], json!(["480p", "720p", "1080p", "4K"]));

        let (_, json) = send(&app, "GET", "/api/categories/stats", None, false).await;
        assert_eq!(json["total"], 2);
        assert_eq!(json["byCategory"]["Web Series"], 1);
        assert_eq!(json["byLanguage"]["Telugu"], 1);
    }

    #[tokio::test]
    async fn test_notification_flow() {
        let app = test_app();
        let base = "/api/admin/notifications";

        let report = json!({
            "type": "issue_report",
            "title": "Broken link",
            "message": "720p link is dead",
            "data": { "user": { "email": "viewer@example.com" } }
        });
        let (status, json) = send(&app, "POST", base, Some(report), false).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["notification"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, "GET", base, None, false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, json) = send(&app, "GET", base, None, true).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["unread"], 1);
        assert_eq!(json["notifications"][0]["type"], "issue_report");

        let (status, _) = send(&app, "PATCH", &format!("{}/{}/read", base, id), None, true).await;
        assert_eq!(status, StatusCode::OK);

        let reply = json!({ "notificationId": id, "message": "Fixed" });
        let (status, json) = send(&app, "POST", &format!("{}/reply", base), Some(reply), true).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["reply"]["adminReply"], true);

        let (_, json) = send(&app, "GET", &format!("{}/{}/replies", base, id), None, true).await;
        assert_eq!(json["total"], 1);

        let (status, _) = send(&app, "DELETE", &format!("{}/{}", base, id), None, true).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("{}/{}", base, id), None, true).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_settings_mute() {
        let app = test_app();
        let base = "/api/admin/notifications";

        let settings = json!({ "movieRequests": false });
        let (status, json) = send(&app, "PUT", &format!("{}/settings", base), Some(settings), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["movieRequests"], false);
        assert_eq!(json["issueReports"], true);

        let request = json!({ "type": "movie_request", "title": "Add KGF", "message": "please" });
        let (status, _) = send(&app, "POST", base, Some(request), false).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (_, json) = send(&app, "GET", base, None, true).await;
        assert_eq!(json["total"], 0);
    }
}
