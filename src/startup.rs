use crate::db::connection::DbPool;

/// Shared state handed to every handler through an `Extension` layer.
/// Cloning is cheap; the pool is internally reference counted.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        AppState { db }
    }
}
