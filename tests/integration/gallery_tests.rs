use crate::common::{image_bytes, mount_bytes, mount_page, mount_status, png_bytes, test_context};
use image::ImageFormat;
use page_gallery::config::ExtractorKind;
use page_gallery::pipeline::{run_gallery, Coordinator};
use page_gallery::{GalleryError, RunStage};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_single_image_end_to_end() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/page.html", r#"<html><body><img src="cat.png"></body></html>"#).await;
    mount_bytes(&server, "/cat.png", png_bytes(300, 150), "image/png").await;

    let scratch = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join("gallery");
    let context = test_context(&format!("{}/page.html", base_url), &output, scratch.path());

    let report = run_gallery(&context).await.expect("Gallery run failed");

    // Output folder was created and holds original, thumbnail and gallery
    assert!(output.join("0.cat.png").exists());
    assert!(output.join("0.cat.resized.png").exists());
    assert_eq!(report.gallery.path, output.join("index.html"));

    let thumb = image::open(output.join("0.cat.resized.png")).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (120, 60));

    let html = std::fs::read_to_string(output.join("index.html")).unwrap();
    let expected_caption = format!(
        "URL: {}/cat.png Original size: 300 x 150 Format: png",
        base_url
    );
    assert!(html.contains(&expected_caption), "missing caption in {}", html);
    assert!(html.contains("src=\"0.cat.resized.png\""));

    assert_eq!(report.statistics.images_found, 1);
    assert_eq!(report.statistics.images_downloaded, 1);
    assert_eq!(report.statistics.thumbnails_written, 1);
    assert_eq!(report.statistics.files_skipped, 0);

    // Scratch page file is gone after the run
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_page_without_images_writes_empty_gallery() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<html><body><p>No pictures here</p></body></html>").await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let context = test_context(&format!("{}/", server.uri()), output.path(), scratch.path());

    let report = run_gallery(&context).await.unwrap();

    assert!(report.images.is_empty());
    let html = std::fs::read_to_string(output.path().join("index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("class=\"item\""));
}

#[tokio::test]
async fn test_failed_image_download_aborts_without_gallery() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", r#"<img src="missing.png">"#).await;
    mount_status(&server, "/missing.png", 404).await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let context = test_context(
        &format!("{}/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );

    let mut coordinator = Coordinator::new(context).unwrap();
    let result = coordinator.run().await;

    assert!(matches!(result, Err(GalleryError::Fetch(_))));
    assert_eq!(coordinator.stage(), RunStage::Failed);
    assert!(!output.path().join("index.html").exists());
}

#[tokio::test]
async fn test_aborted_run_keeps_sibling_originals() {
    let server = MockServer::start().await;
    let body = png_bytes(40, 20);
    mount_page(&server, "/page.html", r#"<img src="ok.png"><img src="late.png">"#).await;
    mount_bytes(&server, "/ok.png", body.clone(), "image/png").await;

    Mock::given(method("GET"))
        .and(path("/late.png"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let context = test_context(
        &format!("{}/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );

    assert!(run_gallery(&context).await.is_err());

    assert_eq!(std::fs::read(output.path().join("0.ok.png")).unwrap(), body);
    assert!(!output.path().join("0.ok.resized.png").exists());
    assert!(!output.path().join("index.html").exists());
}

#[tokio::test]
async fn test_unreachable_image_host_aborts() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", r#"<img src="http://127.0.0.1:9/x.png">"#).await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let context = test_context(
        &format!("{}/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );

    assert!(run_gallery(&context).await.is_err());
    assert!(!output.path().join("index.html").exists());
}

#[tokio::test]
async fn test_page_fetch_failure_aborts_before_output() {
    let server = MockServer::start().await;
    mount_status(&server, "/page.html", 500).await;

    let scratch = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join("never");
    let context = test_context(&format!("{}/page.html", server.uri()), &output, scratch.path());

    assert!(run_gallery(&context).await.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_non_image_download_is_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/page.html",
        r#"<img src="/a.jpg"><img src="/tracker.gif.php">"#,
    )
    .await;
    mount_bytes(&server, "/a.jpg", image_bytes(240, 240, ImageFormat::Jpeg), "image/jpeg").await;
    mount_bytes(&server, "/tracker.gif.php", b"<?php echo 1;".to_vec(), "text/plain").await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let context = test_context(
        &format!("{}/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );

    let report = run_gallery(&context).await.unwrap();

    assert_eq!(report.images.len(), 1);
    assert_eq!(report.images[0].info.format, "jpeg");
    assert_eq!(report.statistics.files_skipped, 1);
    assert!(output.path().join("1.tracker.gif.php").exists());
}

#[tokio::test]
async fn test_pre_existing_files_are_thumbnailed_without_url() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", r#"<img src="new.png">"#).await;
    mount_bytes(&server, "/new.png", png_bytes(100, 100), "image/png").await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(output.path().join("old.png"), png_bytes(50, 25)).unwrap();

    let context = test_context(
        &format!("{}/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );
    let report = run_gallery(&context).await.unwrap();

    assert_eq!(report.images.len(), 2);
    assert_eq!(report.statistics.provenance_misses, 1);
    assert!(output.path().join("old.resized.png").exists());
}

#[tokio::test]
async fn test_html_extractor_end_to_end() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/dir/page.html",
        r#"<html><body><IMG alt="x" SRC="../pics/dog.png"></body></html>"#,
    )
    .await;
    mount_bytes(&server, "/pics/dog.png", png_bytes(60, 60), "image/png").await;

    let scratch = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut context = test_context(
        &format!("{}/dir/page.html", server.uri()),
        output.path(),
        scratch.path(),
    );
    context.extractor = ExtractorKind::Html;
    context.gallery_file = "gallery.html".to_string();

    let report = run_gallery(&context).await.unwrap();

    assert_eq!(report.images.len(), 1);
    assert_eq!(
        report.images[0].source_url.as_ref().map(|u| u.as_str().to_string()),
        Some(format!("{}/pics/dog.png", server.uri()))
    );
    assert!(output.path().join("gallery.html").exists());
    assert!(!output.path().join("index.html").exists());
}
