use leaflet::{Leaflet, LeafletError, ScrapedRecipe};
use std::time::Duration;

/// URL → document with builder API
#[tokio::test]
async fn test_builder_url_to_document() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/porridge")
        .match_header("user-agent", "PorridgeBot/2.0")
        .with_status(200)
        .with_body(
            r#"<html><head><script type="application/ld+json">
            {
                "@type": "Recipe",
                "name": "Porridge",
                "totalTime": "PT10M",
                "recipeIngredient": ["50g rolled oats", "350ml milk", "a pinch of salt"],
                "recipeInstructions": "Put the oats, milk and salt in a pan. Simmer for 5 mins."
            }
            </script></head></html>"#,
        )
        .create_async()
        .await;

    let result = Leaflet::builder()
        .url(format!("{}/porridge", server.url()))
        .timeout(Duration::from_secs(5))
        .user_agent("PorridgeBot/2.0")
        .build()
        .await
        .unwrap();

    assert_eq!(
        result.document.instructions,
        "Put the @oats{50%g}, @milk{350%ml} and @salt{1%pinch} in a pan. Simmer for ~{5%min}s."
    );
    assert_eq!(result.matched_count(), 3);
}

/// Recipe → document with builder API, no network involved
#[tokio::test]
async fn test_builder_recipe_to_document() {
    let recipe = ScrapedRecipe {
        title: "Tea".to_string(),
        link: "https://example.com/tea".to_string(),
        total_time: 5,
        image: String::new(),
        instructions: "Steep the tea for 3 to 4 minutes, then add milk.".to_string(),
        ingredients: vec!["1 tea bag".to_string(), "honey".to_string()],
    };

    let result = Leaflet::builder().recipe(recipe).build().await.unwrap();

    assert_eq!(
        result.document.instructions,
        "Steep the @tea{1} for ~{3 to 4%minutes}, then add milk."
    );
    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(result.diagnostics[1].token, "@honey{}");
    assert!(!result.diagnostics[1].is_match());
}

#[tokio::test]
async fn test_builder_without_source() {
    let result = Leaflet::builder().timeout(Duration::from_secs(1)).build().await;

    match result {
        Err(LeafletError::BuilderError(message)) => assert!(message.contains(".url()")),
        other => panic!("expected BuilderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_builder_unsupported_page() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/blog")
        .with_status(200)
        .with_body("<html><body>No recipe here</body></html>")
        .create_async()
        .await;

    let result = Leaflet::builder()
        .url(format!("{}/blog", server.url()))
        .build()
        .await;

    assert!(matches!(result, Err(LeafletError::UnsupportedSource { .. })));
}
