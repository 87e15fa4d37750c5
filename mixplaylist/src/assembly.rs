//! Déroulement complet d'une exécution mensuelle

use crate::error::Result;
use crate::parser::{parse_posts, SongQuery};
use crate::playlist::{batches, PlaylistSpec};
use crate::resolver::{resolve_all, ResolvedTrack};
use crate::sources::{CatalogService, FeedSource, ImageSource};
use chrono::Datelike;
use mixcovers::{month_name, CoverError, CoverPipeline, CoverSettings};
use mixfeed::{FeedSettings, RawPost, TimeWindow};
use mixspotify::{Playlist, MAX_ITEMS_PER_REQUEST};
use tracing::{debug, info, warn};

/// Paramètres d'une exécution
#[derive(Debug, Clone)]
pub struct AssemblySettings {
    /// Communauté dont les posts deviennent des pistes
    pub community: String,
    pub time_window: TimeWindow,
    /// Nombre de posts demandés
    pub limit: u32,
    /// Communauté dont le meilleur post devient la couverture
    pub cover_community: String,
    pub insert_batch_size: usize,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self::from_sections(&FeedSettings::default(), &CoverSettings::default(), MAX_ITEMS_PER_REQUEST)
    }
}

impl AssemblySettings {
    pub fn from_sections(feed: &FeedSettings, cover: &CoverSettings, insert_batch_size: usize) -> Self {
        Self {
            community: feed.community.clone(),
            time_window: feed.time_window,
            limit: feed.limit,
            cover_community: cover.community.clone(),
            insert_batch_size,
        }
    }
}

/// Devenir de la couverture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverStatus {
    /// Couverture envoyée
    Uploaded { bytes: usize, width: u32, height: u32 },
    /// Étape désactivée
    Disabled,
    /// Aucun post exploitable dans la communauté de couverture
    Skipped,
    /// Échec journalisé, la playlist est conservée
    Failed(String),
}

/// Bilan d'une exécution menée à terme
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub playlist: Playlist,
    /// Nombre de requêtes issues des titres
    pub songs: usize,
    pub found: Vec<ResolvedTrack>,
    pub not_found: Vec<SongQuery>,
    /// Nombre de pistes effectivement ajoutées
    pub added: usize,
    /// Nombre d'appels d'ajout
    pub batches: usize,
    pub cover: CoverStatus,
}

/// Issue d'une exécution
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Le flux principal est vide (ou illisible)
    NoPosts,
    /// Aucun titre n'a pu être analysé
    NoSongs { posts: usize },
    Completed(RunSummary),
}

/// Orchestrateur : flux → analyse → playlist → pistes → couverture
pub struct PlaylistAssembler<'a> {
    feed: &'a dyn FeedSource,
    images: &'a dyn ImageSource,
    catalog: &'a dyn CatalogService,
    covers: Option<CoverPipeline>,
    settings: AssemblySettings,
}

impl<'a> PlaylistAssembler<'a> {
    pub fn new(
        feed: &'a dyn FeedSource,
        images: &'a dyn ImageSource,
        catalog: &'a dyn CatalogService,
        settings: AssemblySettings,
    ) -> Self {
        Self {
            feed,
            images,
            catalog,
            covers: None,
            settings,
        }
    }

    /// Active l'étape de couverture
    pub fn with_covers(mut self, pipeline: CoverPipeline) -> Self {
        self.covers = Some(pipeline);
        self
    }

    pub fn settings(&self) -> &AssemblySettings {
        &self.settings
    }

    /// Exécute le mois de `date`
    ///
    /// Seules les erreurs du catalogue sont fatales. Une playlist est créée à
    /// chaque exécution menée au-delà des gardes, sans déduplication.
    pub async fn run(&self, date: &impl Datelike) -> Result<RunOutcome> {
        let posts = self
            .fetch_posts(&self.settings.community, self.settings.limit)
            .await;
        if posts.is_empty() {
            warn!("No posts found in r/{}", self.settings.community);
            return Ok(RunOutcome::NoPosts);
        }

        let queries = parse_posts(&posts);
        info!(
            "Parsed {} songs from {} posts",
            queries.len(),
            posts.len()
        );
        if queries.is_empty() {
            warn!("No songs could be parsed from the posts");
            return Ok(RunOutcome::NoSongs { posts: posts.len() });
        }

        let owner = self.catalog.current_user_id().await?;
        let spec = PlaylistSpec::for_date(&self.settings.community, date);
        let playlist = self.catalog.create_playlist(&owner, &spec).await?;
        info!("Created playlist: {}", playlist.name);

        let resolutions = resolve_all(self.catalog, &queries).await?;

        let track_ids = resolutions.track_ids();
        let mut added = 0;
        let mut batch_count = 0;
        for batch in batches(&track_ids, self.settings.insert_batch_size) {
            self.catalog.add_tracks(&playlist.id, batch).await?;
            added += batch.len();
            batch_count += 1;
            info!("Added {} tracks to playlist", batch.len());
        }

        let cover = match &self.covers {
            Some(pipeline) => self.apply_cover(pipeline, &playlist, date.month()).await,
            None => {
                debug!("Cover step disabled");
                CoverStatus::Disabled
            }
        };

        Ok(RunOutcome::Completed(RunSummary {
            playlist,
            songs: queries.len(),
            found: resolutions.found,
            not_found: resolutions.not_found,
            added,
            batches: batch_count,
            cover,
        }))
    }

    async fn fetch_posts(&self, community: &str, limit: u32) -> Vec<RawPost> {
        match self
            .feed
            .top_posts(community, self.settings.time_window, limit)
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Error fetching posts from r/{}: {}", community, e);
                Vec::new()
            }
        }
    }

    async fn apply_cover(&self, pipeline: &CoverPipeline, playlist: &Playlist, month: u32) -> CoverStatus {
        let posts = self.fetch_posts(&self.settings.cover_community, 1).await;
        let Some(post) = posts.into_iter().next() else {
            warn!("No cover image found in r/{}", self.settings.cover_community);
            return CoverStatus::Skipped;
        };

        let label = month_name(month).unwrap_or_default().to_string();
        let cover = match self.build_cover(pipeline, &post, label).await {
            Ok(cover) => cover,
            Err(e) => {
                warn!("Error creating cover image: {}", e);
                return CoverStatus::Failed(e.to_string());
            }
        };

        match self
            .catalog
            .upload_cover(&playlist.id, &cover.to_base64())
            .await
        {
            Ok(()) => {
                info!("Cover image uploaded successfully");
                CoverStatus::Uploaded {
                    bytes: cover.len(),
                    width: cover.width,
                    height: cover.height,
                }
            }
            Err(e) => {
                warn!("Error uploading cover image: {}", e);
                CoverStatus::Failed(e.to_string())
            }
        }
    }

    async fn build_cover(
        &self,
        pipeline: &CoverPipeline,
        post: &RawPost,
        label: String,
    ) -> mixcovers::Result<mixcovers::CoverImage> {
        let url = post.url.as_deref().ok_or(CoverError::MissingUrl)?;
        let data = self.images.fetch_image(url).await?;
        pipeline.render(data, label).await
    }
}
