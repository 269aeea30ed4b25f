use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::catalog::{Catalog, DEFAULT_FEATURED_LIMIT};
use crate::error_handling::json_error;

#[derive(serde::Deserialize)]
pub struct CategoryQuery {
    /// When set, only the first `featured` categories are returned.
    featured: Option<usize>,
}

#[tracing::instrument(name = "Listing product categories", skip(catalog, query))]
pub async fn list_categories(
    query: web::Query<CategoryQuery>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    let categories = match query.featured {
        Some(limit) => catalog.featured(limit),
        None => catalog.all(),
    };
    HttpResponse::Ok().json(categories)
}

/// The categories the home page features.
#[tracing::instrument(name = "Listing featured product categories", skip(catalog))]
pub async fn featured_categories(catalog: web::Data<Catalog>) -> HttpResponse {
    HttpResponse::Ok().json(catalog.featured(DEFAULT_FEATURED_LIMIT))
}

#[tracing::instrument(name = "Fetching a product category", skip(catalog))]
pub async fn get_category(slug: web::Path<String>, catalog: web::Data<Catalog>) -> HttpResponse {
    match catalog.by_slug(&slug) {
        Some(category) => HttpResponse::Ok().json(category),
        None => json_error(StatusCode::NOT_FOUND, "Category not found"),
    }
}

/// Reports an unparsable category query string with the usual JSON error body.
pub fn category_query_error(error: QueryPayloadError, request: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %error, query = request.query_string(), "Rejected a category query");
    InternalError::from_response(
        error,
        json_error(StatusCode::BAD_REQUEST, "Invalid query string"),
    )
    .into()
}
