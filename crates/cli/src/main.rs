use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tenglish_indexer::{IndexerConfig, NoteIndexer};
use tenglish_predict::{PredictionModel, TrainerConfig};
use tenglish_search::{Retriever, DEFAULT_TOP_K};
use tenglish_vector_store::{DenseEmbedder, FsNoteStore, StubEmbedder, VectorArtifactStore};

mod config;

#[derive(Parser)]
#[command(name = "tenglish")]
#[command(about = "Hybrid retrieval and prediction over code-mixed notes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (default: ./tenglish.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty note
    Create {
        /// Note id (filename without extension)
        name: String,
    },

    /// Replace a note's text and re-index it
    Edit {
        name: String,
        /// Full replacement text
        text: String,
    },

    /// Delete a note and its vector artifacts
    Delete { name: String },

    /// Print a note's text
    Show { name: String },

    /// List all notes
    List,

    /// Search notes with the hybrid ranker
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Suggest next words for a context fragment
    Predict {
        context: String,

        /// Maximum number of suggestions
        #[arg(short = 'k', long, default_value_t = 5)]
        top_k: usize,
    },

    /// Retrain the prediction model on the current notes corpus
    Train,

    /// Report corpus directories, vocabulary sizes, and note/artifact
    /// consistency
    Debug,
}

fn embedder() -> Box<dyn DenseEmbedder> {
    Box::new(StubEmbedder::default())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = config::resolve(cli.config.as_deref())?;
    log::debug!(
        "Using notes dir {:?}, embeddings dir {:?}",
        config.notes_dir,
        config.embeddings_dir
    );

    match cli.command {
        Commands::Create { name } => run_create(config, &name).await?,
        Commands::Edit { name, text } => run_edit(config, &name, &text).await?,
        Commands::Delete { name } => run_delete(config, &name).await?,
        Commands::Show { name } => run_show(config, &name).await?,
        Commands::List => run_list(config).await?,
        Commands::Search { query, top_k } => run_search(config, &query, top_k).await?,
        Commands::Predict { context, top_k } => run_predict(config, &context, top_k).await?,
        Commands::Train => run_train(config).await?,
        Commands::Debug => run_debug(config).await?,
    }

    Ok(())
}

async fn run_create(config: IndexerConfig, name: &str) -> Result<()> {
    let indexer = NoteIndexer::open(config, embedder()).await?;
    indexer
        .create_note(name)
        .await
        .with_context(|| format!("Failed to create note '{name}'"))?;
    println!("Created note '{name}'");
    Ok(())
}

async fn run_edit(config: IndexerConfig, name: &str, text: &str) -> Result<()> {
    let mut indexer = NoteIndexer::open(config, embedder()).await?;
    let stats = indexer
        .edit_note(name, text)
        .await
        .with_context(|| format!("Failed to edit note '{name}'"))?;
    println!(
        "Indexed note '{name}': {} tokens, {} new words, {} ms",
        stats.token_count(),
        stats.new_word_count(),
        stats.time_ms
    );
    Ok(())
}

async fn run_delete(config: IndexerConfig, name: &str) -> Result<()> {
    let mut indexer = NoteIndexer::open(config, embedder()).await?;
    if indexer.remove_note(name).await? {
        println!("Deleted note '{name}'");
    } else {
        println!("Note '{name}' did not exist");
    }
    Ok(())
}

async fn run_show(config: IndexerConfig, name: &str) -> Result<()> {
    let indexer = NoteIndexer::open(config, embedder()).await?;
    let text = indexer
        .note_text(name)
        .await
        .with_context(|| format!("Failed to read note '{name}'"))?;
    println!("{text}");
    Ok(())
}

async fn run_list(config: IndexerConfig) -> Result<()> {
    let indexer = NoteIndexer::open(config, embedder()).await?;
    let notes = indexer.list_notes().await?;
    if notes.is_empty() {
        println!("No notes yet");
        return Ok(());
    }
    for note in notes {
        let marker = if note.indexed { "indexed" } else { "pending" };
        println!("{:<24} {:>8} B  {marker}", note.note_id, note.bytes);
    }
    Ok(())
}

async fn run_search(config: IndexerConfig, query: &str, top_k: usize) -> Result<()> {
    let retriever = Retriever::open(config, embedder()).await?;
    let results = retriever.find(query, top_k).await?;
    if results.is_empty() {
        println!("No matching notes");
        return Ok(());
    }
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{}. {} (score {:.4})\n   {}",
            rank + 1,
            result.note_id,
            result.score,
            result.content.lines().next().unwrap_or("")
        );
    }
    Ok(())
}

async fn run_predict(config: IndexerConfig, context: &str, top_k: usize) -> Result<()> {
    let model = train_model(&config).await?;
    let candidates = model.predict(context, top_k);
    if candidates.is_empty() {
        println!("No suggestions for '{context}'");
        return Ok(());
    }
    for (word, score) in candidates {
        println!("{word:<24} {score:.4}");
    }
    Ok(())
}

async fn run_train(config: IndexerConfig) -> Result<()> {
    let model = train_model(&config).await?;
    println!(
        "Trained prediction model on {} vocabulary words",
        model.vocabulary_len()
    );
    Ok(())
}

async fn run_debug(config: IndexerConfig) -> Result<()> {
    let artifacts = VectorArtifactStore::new(&config.embeddings_dir);
    let indexer = NoteIndexer::open(config.clone(), embedder()).await?;

    println!("Notes dir:      {}", config.notes_dir.display());
    println!("Embeddings dir: {}", config.embeddings_dir.display());
    let (latin, other) = indexer.vocabulary_sizes();
    println!("Vocabulary:     {latin} latin / {other} other words");

    let notes = indexer.list_notes().await?;
    println!("Notes:          {}", notes.len());
    for note in &notes {
        let marker = if note.indexed { "indexed" } else { "pending" };
        println!("  {:<24} {:>8} B  {marker}", note.note_id, note.bytes);
    }

    let note_ids: std::collections::HashSet<&str> =
        notes.iter().map(|n| n.note_id.as_str()).collect();
    let orphans: Vec<String> = artifacts
        .list_note_ids()
        .await?
        .into_iter()
        .filter(|id| !note_ids.contains(id.as_str()))
        .collect();
    if orphans.is_empty() {
        println!("Artifacts:      consistent with the notes directory");
    } else {
        println!("Artifacts without a note (stale, safe to delete):");
        for id in orphans {
            println!("  {id}");
        }
    }
    Ok(())
}

async fn train_model(config: &IndexerConfig) -> Result<PredictionModel> {
    let notes = FsNoteStore::new(&config.notes_dir);
    let mut model = PredictionModel::new(TrainerConfig::default());
    match model.train_from_notes(&notes).await {
        Ok(()) => Ok(model),
        Err(tenglish_predict::PredictError::EmptyCorpus) => {
            bail!("No notes to train on; create some notes first")
        }
        Err(err) => Err(err).context("Training failed"),
    }
}
