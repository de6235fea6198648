//! Gallery run coordinator
//!
//! This module sequences one gallery run:
//! - Fetching the target page into a per-run scratch file
//! - Preparing the output folder
//! - Extracting and resolving image sources
//! - Downloading the images
//! - Thumbnailing the output folder
//! - Writing the gallery page
//!
//! Any stage error aborts the run; no gallery is written in that case.

use crate::config::{Config, ExtractorKind};
use crate::output::{write_gallery, GalleryPage, RunStatistics};
use crate::pipeline::downloader::download_all;
use crate::pipeline::extractor::{extract_image_references, extractor_for, ImageSourceExtractor};
use crate::pipeline::fetcher::{build_http_client, fetch_to_file};
use crate::state::{RunStage, StageTracker};
use crate::thumbnail::{resize_all, ImageCodec, RasterCodec, ResizedImage};
use crate::GalleryError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Everything a run needs, resolved from the command line and configuration
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Page to collect images from
    pub target_url: Url,

    /// Folder receiving originals, thumbnails and the gallery
    pub output_folder: PathBuf,

    /// Gallery file name inside the output folder
    pub gallery_file: String,

    /// Directory for the per-run page temp file
    pub scratch_dir: PathBuf,

    /// Maximum downloads in flight at once
    pub max_concurrent: usize,

    /// Thumbnail width in pixels
    pub thumbnail_width: u32,

    /// Extractor used on the page
    pub extractor: ExtractorKind,

    /// User-Agent header for every request
    pub user_agent: String,
}

impl RunContext {
    /// Builds a context from validated configuration
    pub fn new(target_url: Url, output_folder: PathBuf, config: &Config) -> Self {
        Self {
            target_url,
            output_folder,
            gallery_file: config.output.gallery_file.clone(),
            scratch_dir: config
                .output
                .scratch_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            max_concurrent: config.download.max_concurrent as usize,
            thumbnail_width: config.thumbnail.width,
            extractor: config.extractor.kind,
            user_agent: config.download.user_agent.clone(),
        }
    }

    /// Path the gallery is written to
    pub fn gallery_path(&self) -> PathBuf {
        self.output_folder.join(&self.gallery_file)
    }
}

/// What a successful run produced
#[derive(Debug)]
pub struct RunReport {
    pub gallery: GalleryPage,
    pub images: Vec<ResizedImage>,
    pub statistics: RunStatistics,
}

/// Drives one run through its stages
pub struct Coordinator {
    context: RunContext,
    client: Client,
    extractor: Box<dyn ImageSourceExtractor>,
    codec: Arc<dyn ImageCodec>,
    stages: StageTracker,
    statistics: RunStatistics,
}

impl Coordinator {
    /// Creates a coordinator using the `image` crate codec
    ///
    /// Arguments are already parsed by the time a context exists, so the
    /// tracker starts at `ParsingArgs` and moves on when `run` begins.
    pub fn new(context: RunContext) -> Result<Self, GalleryError> {
        Self::with_codec(context, Arc::new(RasterCodec::new()))
    }

    /// Creates a coordinator with a custom image codec
    pub fn with_codec(
        context: RunContext,
        codec: Arc<dyn ImageCodec>,
    ) -> Result<Self, GalleryError> {
        let client = build_http_client(&context.user_agent)?;
        let extractor = extractor_for(context.extractor);

        Ok(Self {
            context,
            client,
            extractor,
            codec,
            stages: StageTracker::new(),
            statistics: RunStatistics::default(),
        })
    }

    /// Current stage of the run
    pub fn stage(&self) -> RunStage {
        self.stages.current()
    }

    /// Runs every stage, marking the run failed on the first error
    pub async fn run(&mut self) -> Result<RunReport, GalleryError> {
        let started = Instant::now();

        match self.run_stages().await {
            Ok((gallery, images)) => {
                self.statistics.stage_timings = self.stages.timings().to_vec();
                self.statistics.elapsed = started.elapsed();
                Ok(RunReport {
                    gallery,
                    images,
                    statistics: self.statistics.clone(),
                })
            }
            Err(e) => {
                tracing::error!("Run failed during {}: {}", self.stages.current(), e);
                self.stages.fail();
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<(GalleryPage, Vec<ResizedImage>), GalleryError> {
        let target_url = self.context.target_url.clone();
        let output_folder = self.context.output_folder.clone();

        self.stages.advance(RunStage::FetchingPage)?;
        let html = self.fetch_page(&target_url).await?;

        self.stages.advance(RunStage::PreparingOutput)?;
        ensure_output_folder(&output_folder).await?;

        self.stages.advance(RunStage::Extracting)?;
        let references = extract_image_references(self.extractor.as_ref(), &html, &target_url)?;
        self.statistics.images_found = references.len();
        tracing::info!("Found {} images on {}", references.len(), target_url);

        self.stages.advance(RunStage::Downloading)?;
        let urls: Vec<Url> = references.into_iter().map(|r| r.resolved).collect();
        let records = download_all(
            &self.client,
            &urls,
            &output_folder,
            self.context.max_concurrent,
        )
        .await?;
        self.statistics.images_downloaded = records.len();

        self.stages.advance(RunStage::Thumbnailing)?;
        let batch = resize_all(
            Arc::clone(&self.codec),
            &output_folder,
            &records,
            self.context.thumbnail_width,
        )
        .await?;
        self.statistics.thumbnails_written = batch.images.len();
        self.statistics.files_skipped = batch.skipped.len();
        self.statistics.provenance_misses = batch.provenance_misses();

        self.stages.advance(RunStage::Rendering)?;
        let gallery = write_gallery(
            &output_folder,
            &self.context.gallery_file,
            &target_url,
            &batch.images,
        )
        .await?;

        self.stages.advance(RunStage::Finished)?;

        Ok((gallery, batch.images))
    }

    /// Streams the page into a unique scratch file and reads it back as text
    ///
    /// The scratch file is removed when this returns.
    async fn fetch_page(&self, url: &Url) -> Result<String, GalleryError> {
        let scratch_dir = &self.context.scratch_dir;
        let scratch = tempfile::Builder::new()
            .prefix("page-gallery-")
            .suffix(".html")
            .tempfile_in(scratch_dir)
            .map_err(|e| GalleryError::filesystem("create page temp file in", scratch_dir, e))?;

        tracing::info!("Downloading {} to {}", url, scratch.path().display());
        fetch_to_file(&self.client, url, scratch.path()).await?;

        let bytes = tokio::fs::read(scratch.path())
            .await
            .map_err(|e| GalleryError::filesystem("read page temp file", scratch.path(), e))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Creates the output folder if missing; an existing folder is reused as is
async fn ensure_output_folder(folder: &Path) -> Result<(), GalleryError> {
    if tokio::fs::metadata(folder).await.is_ok_and(|m| m.is_dir()) {
        tracing::debug!("Reusing output folder {}", folder.display());
        return Ok(());
    }

    tracing::info!("Folder {} doesn't exist. Creating...", folder.display());
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|e| GalleryError::filesystem("create output folder", folder, e))
}

/// Runs a complete gallery build
///
/// # Example
///
/// ```no_run
/// use page_gallery::config::Config;
/// use page_gallery::pipeline::{run_gallery, RunContext};
/// use page_gallery::url::parse_target_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = parse_target_url("https://example.com/")?;
/// let context = RunContext::new(url, "gallery".into(), &Config::default());
/// let report = run_gallery(&context).await?;
/// println!("{}", report.gallery.path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_gallery(context: &RunContext) -> Result<RunReport, GalleryError> {
    let mut coordinator = Coordinator::new(context.clone())?;
    coordinator.run().await
}
