use sqlx::PgPool;

/// Runs read queries against the pool.
///
/// Queries are plain structs implementing `kanau::processor::Processor`
/// for this type; multi-record writes go through `*_tx` functions on the
/// entities instead, so they can share one transaction.
#[derive(Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
