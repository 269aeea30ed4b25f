use embroidery_site::catalog::ProductCategory;
use embroidery_site::ErrorBody;

use crate::helpers::spawn_app;

#[tokio::test]
async fn categories_are_listed_in_catalog_order() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/categories").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let categories: Vec<ProductCategory> = response.json().await.unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0].slug, "bullion-crests");
    assert!(!categories[0].images.is_empty());
}

#[tokio::test]
async fn featured_categories_are_limited() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/categories?featured=3").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let categories: Vec<ProductCategory> = response.json().await.unwrap();
    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["bullion-crests", "patches", "aiguillette"]);
}

#[tokio::test]
async fn a_category_is_fetched_by_slug() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/categories/braids").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let category: ProductCategory = response.json().await.unwrap();
    assert_eq!(category.name, "Military Braids");
    assert_eq!(category.banner.title, "Military Braids");
}

#[tokio::test]
async fn unknown_category_returns_404() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/categories/baseball-caps").await;

    // assert
    assert_eq!(404, response.status().as_u16());
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Category not found");
}

#[tokio::test]
async fn home_page_features_the_first_three_categories() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/categories/featured").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let categories: Vec<ProductCategory> = response.json().await.unwrap();
    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["bullion-crests", "patches", "aiguillette"]);
}

#[tokio::test]
async fn unparsable_featured_count_returns_a_json_400() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec!["featured=abc", "featured=-1"];

    for query in test_cases {
        // act
        let response = app.get(&format!("/api/categories?{}", query)).await;

        // assert
        assert_eq!(400, response.status().as_u16(), "{} was accepted", query);
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Invalid query string");
    }
}
