use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lyric_recommender::analysis::LyricAnalyzer;
use lyric_recommender::catalog::HttpCatalogClient;
use lyric_recommender::config::{
    AppConfig, CliConfig, FileConfig, TokenizerKind, DEFAULT_CATALOG_TIMEOUT_SEC,
};
use lyric_recommender::metrics;
use lyric_recommender::recommend::{
    build_knowledge_graph, ContentSimilarity, InMemoryPreferenceStore, PreferenceStore,
    Recommender, SimilarityRanker, SongCorpus,
};
use lyric_recommender::rhyme::RhymeAnalyzer;
use lyric_recommender::sentiment::{LexiconPolarity, SentimentScorer};
use lyric_recommender::text::{JiebaTokenizer, PinyinLookup, Tokenizer, WhitespaceTokenizer};
use lyric_recommender::theme::ThemeClassifier;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(name = "lyric-recommender", about = "Analyze lyrics and recommend similar songs")]
struct CliArgs {
    /// Path to a TOML config file. Values in it override the CLI flags.
    #[clap(long, global = true, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the external song catalog. Without it only the local corpus is used.
    #[clap(long, global = true)]
    pub catalog_url: Option<String>,

    /// Timeout in seconds for each catalog request.
    #[clap(long, global = true, default_value_t = DEFAULT_CATALOG_TIMEOUT_SEC)]
    pub catalog_timeout_sec: u64,

    /// Platform identifier reported for external results.
    #[clap(long, global = true)]
    pub platform: Option<String>,

    /// JSON file with the local song corpus. Built-in samples are used when missing.
    #[clap(long, global = true, value_parser = parse_path)]
    pub corpus: Option<PathBuf>,

    /// Text segmentation backend.
    #[clap(long, global = true, value_enum, default_value_t = TokenizerKind::Jieba)]
    pub tokenizer: TokenizerKind,

    /// Content similarity measure: jaccard or tf_cosine.
    #[clap(long, global = true, default_value = "jaccard")]
    pub content_similarity: ContentSimilarity,

    /// Print the collected Prometheus metrics to stderr before exiting.
    #[clap(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full analysis of a lyric as JSON.
    Analyze {
        /// Lyric file, or "-" for stdin.
        #[clap(default_value = "-")]
        input: String,
    },
    /// Print songs with similar lyrics as JSON.
    Recommend {
        /// Lyric file, or "-" for stdin.
        #[clap(default_value = "-")]
        input: String,

        /// Number of songs to return.
        #[clap(long, default_value_t = 5)]
        top_k: usize,

        /// Preferred theme, may be repeated.
        #[clap(long = "theme")]
        themes: Vec<String>,

        /// Preferred style, may be repeated.
        #[clap(long = "style")]
        styles: Vec<String>,

        /// Use the preferences stored for this user in the config file.
        #[clap(long)]
        user: Option<String>,
    },
    /// Print the artist, theme and style graph of the local corpus as JSON.
    Graph,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            catalog_url: self.catalog_url.clone(),
            catalog_timeout_sec: self.catalog_timeout_sec,
            platform: self.platform.clone(),
            corpus_path: self.corpus.clone(),
            tokenizer: self.tokenizer,
            content_similarity: self.content_similarity,
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read lyrics from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read lyrics file: {}", input))
}

fn build_tokenizer(kind: TokenizerKind) -> Arc<dyn Tokenizer> {
    match kind {
        TokenizerKind::Jieba => {
            info!("Loading jieba dictionary...");
            Arc::new(JiebaTokenizer::new())
        }
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer),
    }
}

fn load_corpus(config: &AppConfig) -> Result<SongCorpus> {
    match &config.corpus_path {
        Some(path) => SongCorpus::load_json(path),
        None => Ok(SongCorpus::with_samples()),
    }
}

fn build_recommender(
    config: &AppConfig,
    tokenizer: Arc<dyn Tokenizer>,
    sentiment: SentimentScorer,
    themes: ThemeClassifier,
) -> Result<Recommender> {
    let corpus = load_corpus(config)?;
    let ranker = SimilarityRanker::new(tokenizer, sentiment, themes)
        .with_content_similarity(config.content_similarity)
        .with_weights(config.fusion);
    let mut recommender = Recommender::new(ranker, Arc::new(corpus));

    if let Some(url) = &config.catalog_url {
        info!("Using external catalog at {} ({})", url, config.platform);
        let client = HttpCatalogClient::new(url.clone(), config.catalog_timeout())
            .context("Failed to create catalog client")?
            .with_platform(config.platform.clone());
        recommender = recommender
            .with_catalog(Arc::new(client))
            .with_lookup_timeout(config.catalog_timeout());
    }
    Ok(recommender)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    metrics::init_metrics();

    let tokenizer = build_tokenizer(config.tokenizer);
    let polarity = Arc::new(LexiconPolarity::new(tokenizer.clone()));
    let sentiment = SentimentScorer::new(tokenizer.clone(), polarity);
    let classifier = ThemeClassifier::with_weights(tokenizer.clone(), config.theme_weights);

    let output = match cli_args.command {
        Command::Analyze { ref input } => {
            let text = read_input(input)?;
            let rhyme = RhymeAnalyzer::new(Arc::new(PinyinLookup));
            let analyzer = LyricAnalyzer::new(sentiment, classifier, rhyme);
            let analysis = analyzer.analyze(&text)?;
            serde_json::to_string_pretty(&analysis)?
        }
        Command::Recommend {
            ref input,
            top_k,
            ref themes,
            ref styles,
            ref user,
        } => {
            let text = read_input(input)?;
            let recommender = build_recommender(&config, tokenizer, sentiment, classifier)?;

            let store = InMemoryPreferenceStore::new();
            for (user_id, preferences) in &config.users {
                store.set(user_id.clone(), preferences.clone());
            }

            let recommendations = match user {
                Some(user_id) if themes.is_empty() && styles.is_empty() => {
                    recommender
                        .recommend_for_user(&text, top_k, user_id, &store)
                        .await?
                }
                _ => {
                    // Flags add to whatever is stored for the user
                    let mut preferences = user
                        .as_deref()
                        .and_then(|id| store.preferences(id))
                        .unwrap_or_default();
                    preferences.preferred_themes.extend(themes.iter().cloned());
                    preferences.preferred_styles.extend(styles.iter().cloned());
                    let preferences = (!preferences.is_empty()).then_some(preferences);
                    recommender
                        .recommend(&text, top_k, preferences.as_ref())
                        .await?
                }
            };
            serde_json::to_string_pretty(&recommendations)?
        }
        Command::Graph => {
            let corpus = load_corpus(&config)?;
            let graph = build_knowledge_graph(&corpus.snapshot());
            info!(
                "Built graph with {} nodes and {} relationships",
                graph.nodes.len(),
                graph.relationships.len()
            );
            serde_json::to_string_pretty(&graph)?
        }
    };

    println!("{}", output);

    if cli_args.metrics {
        eprintln!("{}", metrics::render_metrics());
    }
    Ok(())
}
