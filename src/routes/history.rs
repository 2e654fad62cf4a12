use crate::db;
use crate::db::history::HistoryFilters;
use crate::forms::HistoryQuery;
use crate::helpers::JsonErrorResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

fn parse_filters(query: web::Query<HistoryQuery>) -> Result<HistoryFilters> {
    HistoryFilters::try_from(query.into_inner())
        .map_err(|err| JsonErrorResponse::bad_request(&err))
}

#[tracing::instrument(name = "Get applications history.", skip(pg_pool))]
#[get("/apps")]
pub async fn apps_handler(
    query: web::Query<HistoryQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let filters = parse_filters(query)?;

    db::history::fetch_applications(pg_pool.get_ref(), &filters)
        .await
        .map(web::Json)
        .map_err(|err| JsonErrorResponse::internal_server_error(&err))
}

#[tracing::instrument(name = "Get containers history.", skip(pg_pool))]
#[get("/containers")]
pub async fn containers_handler(
    query: web::Query<HistoryQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let filters = parse_filters(query)?;

    db::history::fetch_containers(pg_pool.get_ref(), &filters)
        .await
        .map(web::Json)
        .map_err(|err| JsonErrorResponse::internal_server_error(&err))
}
