use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use extcheck_contracts::routes::{self, extensions};

use crate::{
    AppState,
    handlers::{
        extensions::{
            add_custom_handler, batch_fixed_handler,
            delete_batch_named_handler, delete_custom_handler,
            delete_fixed_handler, list_extensions_handler,
            save_batch_named_handler, save_fixed_handler,
        },
        handle_websocket::websocket_handler,
    },
};

/// Extension REST endpoints plus the change subscription socket.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(extensions::COLLECTION, get(list_extensions_handler))
        .route(extensions::ADD_CUSTOM, post(add_custom_handler))
        .route(extensions::CUSTOM_ITEM, delete(delete_custom_handler))
        .route(
            extensions::FIXED_ITEM,
            post(save_fixed_handler).delete(delete_fixed_handler),
        )
        .route(
            extensions::FIXED_BATCH,
            patch(batch_fixed_handler)
                .post(save_batch_named_handler)
                .delete(delete_batch_named_handler),
        )
        .route(routes::WEBSOCKET, get(websocket_handler))
}
