use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // A PUT or DELETE against the bare collection has no filename to
        // act on; answer 400 before anything touches the store.
        .route(
            "/media",
            get(media::list_media)
                .put(media::missing_filename)
                .delete(media::missing_filename),
        )
        // The wildcard below requires a non-empty tail, so the trailing
        // slash needs its own 400 route.
        .route(
            "/media/",
            get(media::missing_filename)
                .put(media::missing_filename)
                .delete(media::missing_filename),
        )
        // Wildcard capture keeps multi-segment names as one opaque key
        .route(
            "/media/*filename",
            get(media::get_media)
                .put(media::upload_media)
                .delete(media::delete_media),
        )
}
