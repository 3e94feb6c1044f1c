// ABOUTME: End-to-end tests for image discovery and ranking over HTML snapshots.
// ABOUTME: Covers source precedence, srcset handling, size filtering, dedup, and determinism.

use gearpost_images::{extract_images, Candidate, HtmlDocument, Options, Quality};
use pretty_assertions::assert_eq;

const PAGE_URL: &str = "https://shop.example.com/gear/tents/alpine-2p";

fn rank(html: &str) -> Vec<Candidate> {
    let doc = HtmlDocument::parse(html, PAGE_URL).unwrap();
    extract_images(&doc, &Options::default())
}

fn urls(images: &[Candidate]) -> Vec<&str> {
    images.iter().map(|c| c.url()).collect()
}

#[test]
fn empty_document_yields_empty_list() {
    assert!(rank("").is_empty());
    assert!(rank("<html><body><p>No pictures here.</p></body></html>").is_empty());
}

#[test]
fn only_rejected_images_yields_empty_list() {
    let html = r#"<html><body><main>
        <img src="/img/placeholder.png">
        <img src="/img/spacer.gif">
        <img src="/img/icon.png" width="32" height="32">
    </main></body></html>"#;
    assert!(rank(html).is_empty());
}

#[test]
fn structured_data_outranks_meta_for_same_url() {
    let html = r#"<html><head>
        <meta property="og:image" content="https://cdn.example.com/tent.jpg">
        <script type="application/ld+json">
          {"@type": "Product", "image": ["https://cdn.example.com/tent.jpg"]}
        </script>
    </head><body></body></html>"#;
    let images = rank(html);
    assert_eq!(urls(&images), vec!["https://cdn.example.com/tent.jpg"]);
    assert_eq!(images[0].priority(), 10);
}

#[test]
fn meta_tag_claims_url_before_generic_selectors() {
    let mut body = String::new();
    for i in 0..10 {
        if i == 4 {
            body.push_str(r#"<img src="https://cdn.example.com/a.jpg" width="1000" height="1000">"#);
        } else {
            body.push_str(&format!(
                r#"<img src="https://cdn.example.com/other{}.jpg" width="600" height="600">"#,
                i
            ));
        }
    }
    let html = format!(
        r#"<html><head><meta property="og:image" content="https://cdn.example.com/a.jpg"></head>
        <body><main>{}</main></body></html>"#,
        body
    );

    let images = rank(&html);
    let for_a: Vec<&Candidate> = images
        .iter()
        .filter(|c| c.url() == "https://cdn.example.com/a.jpg")
        .collect();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].priority(), 9);
    assert_eq!(for_a[0].quality(), Quality::Unknown);
    assert_eq!(images[0].url(), "https://cdn.example.com/a.jpg");
    assert!(images[1..].iter().all(|c| c.priority() == 5));
}

#[test]
fn srcset_takes_last_entry_only() {
    let html = r#"<html><body><main>
        <img srcset="a-400.jpg 400w, a-1600.jpg 1600w" src="a-400.jpg">
    </main></body></html>"#;
    let images = rank(html);
    assert_eq!(
        urls(&images),
        vec!["https://shop.example.com/gear/tents/a-1600.jpg"]
    );
}

#[test]
fn tall_thin_image_is_excluded() {
    let html = r#"<html><body><main>
        <img src="/img/banner.jpg" width="150" height="900">
        <img src="/img/boot.jpg" width="900" height="900">
    </main></body></html>"#;
    assert_eq!(
        urls(&rank(html)),
        vec!["https://shop.example.com/img/boot.jpg"]
    );
}

#[test]
fn size_variants_collapse_to_best_ranked() {
    let html = r#"<html><body>
        <div class="carousel">
          <img src="https://cdn.example.com/w_800/products/tent.jpg" width="800" height="800">
        </div>
        <main>
          <img src="https://cdn.example.com/products/tent-300x300.jpg" width="300" height="300">
          <img src="https://cdn.example.com/products/tent.jpg?v=2" width="1200" height="1200">
        </main>
    </body></html>"#;
    let images = rank(html);
    assert_eq!(urls(&images), vec!["https://cdn.example.com/w_800/products/tent.jpg"]);
    assert_eq!(images[0].priority(), 6);
    assert_eq!(images[0].quality(), Quality::High);
}

#[test]
fn equal_priority_variants_keep_largest() {
    let html = r#"<html><body><main>
        <img src="https://cdn.example.com/products/tent-300x300.jpg" width="300" height="300">
        <img src="https://cdn.example.com/products/tent.jpg?v=2" width="1200" height="1200">
        <img src="https://cdn.example.com/w_800/products/tent.jpg" width="800" height="800">
    </main></body></html>"#;
    let images = rank(html);
    assert_eq!(urls(&images), vec!["https://cdn.example.com/products/tent.jpg?v=2"]);
    assert_eq!(images[0].quality(), Quality::Excellent);
}

#[test]
fn selector_bonuses_order_gallery_images() {
    let html = r#"<html><body>
        <main><img src="/img/generic.jpg" width="900" height="900"></main>
        <div class="product-gallery"><img src="/img/gallery.jpg"></div>
        <img class="product-image main" src="/img/hero.jpg">
        <div class="slider"><picture><img src="/img/slide.jpg"></picture></div>
        <img data-zoom-image="/img/zoom-full.jpg" src="/img/zoom-small.jpg">
    </body></html>"#;
    let images = rank(html);
    // Equal scores keep the order the selector table discovered them in.
    let scored: Vec<(&str, i32)> = images.iter().map(|c| (c.url(), c.priority())).collect();
    assert_eq!(
        scored,
        vec![
            ("https://shop.example.com/img/hero.jpg", 8),
            ("https://shop.example.com/img/zoom-full.jpg", 7),
            ("https://shop.example.com/img/gallery.jpg", 7),
            ("https://shop.example.com/img/slide.jpg", 7),
            ("https://shop.example.com/img/generic.jpg", 5),
        ]
    );
}

#[test]
fn lazy_and_protocol_relative_sources_resolve() {
    let html = r#"<html><body><main>
        <img data-src="//cdn.example.com/lazy.jpg">
        <img src="data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP" data-src="/img/never.jpg">
    </main></body></html>"#;
    assert_eq!(urls(&rank(html)), vec!["https://cdn.example.com/lazy.jpg"]);
}

#[test]
fn malformed_json_ld_does_not_block_other_sources() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@type": "Product", "image": </script>
        <meta name="twitter:image" content="/img/card.jpg">
    </head><body><main><img src="/img/body.jpg"></main></body></html>"#;
    let images = rank(html);
    assert_eq!(
        urls(&images),
        vec![
            "https://shop.example.com/img/card.jpg",
            "https://shop.example.com/img/body.jpg",
        ]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let html = r#"<html><head>
        <meta property="og:image" content="/img/og.jpg">
    </head><body><main>
        <img src="/img/one.jpg" width="600" height="600">
        <img src="/img/two.jpg" width="600" height="600">
        <img src="/img/three.jpg">
    </main></body></html>"#;
    let first = rank(html);
    let second = rank(html);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn camel_case_gallery_container_scores_as_plain_selector() {
    let html = r#"<html><body>
        <div class="productGallery"><img src="/img/pack-front.jpg"></div>
        <div class="product-gallery"><img src="/img/pack-side.jpg"></div>
    </body></html>"#;
    let images = rank(html);
    let scored: Vec<(&str, i32)> = images.iter().map(|c| (c.url(), c.priority())).collect();
    assert_eq!(
        scored,
        vec![
            ("https://shop.example.com/img/pack-side.jpg", 7),
            ("https://shop.example.com/img/pack-front.jpg", 5),
        ]
    );
}

#[test]
fn structured_images_found_in_later_product_block() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@type": "Product", "name": "Tent"}</script>
        <script type="application/ld+json">{"@type": "Product", "image": "https://cdn.example.com/tent.jpg"}</script>
    </head><body></body></html>"#;
    let images = rank(html);
    assert_eq!(urls(&images), vec!["https://cdn.example.com/tent.jpg"]);
    assert_eq!(images[0].priority(), 10);
}
