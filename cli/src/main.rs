use anyhow::{bail, Result};
use clap::Parser;
use searchlite_cli::{print_results, DirSource, DocKind, Session};
use searchlite_core::{
    build_query_vector, retrieve, Analyzer, Feedback, InvertedIndex, DEFAULT_MAX_PHRASES,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "searchlite")]
#[command(about = "Index a directory of documents and answer vector-space queries", long_about = None)]
struct Args {
    /// Strip HTML markup from files before tokenizing
    #[arg(long)]
    html: bool,
    /// Stem tokens with the Porter stemmer
    #[arg(long)]
    stem: bool,
    /// Prompt for relevance feedback after each result page
    #[arg(long)]
    feedback: bool,
    /// Cap on the phrase vocabulary size
    #[arg(long, default_value_t = DEFAULT_MAX_PHRASES)]
    max_phrases: usize,
    /// Run one query and exit instead of starting a session
    #[arg(long)]
    query: Option<String>,
    /// Print one-shot results as JSON
    #[arg(long, requires = "query")]
    json: bool,
    /// Results shown per page
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Directory whose files are indexed
    dir: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    if args.max_phrases == 0 {
        bail!("--max-phrases must be at least 1");
    }

    let analyzer = Analyzer::new(args.stem);
    let kind = if args.html { DocKind::Html } else { DocKind::Text };
    let source = DirSource::new(&args.dir, kind, analyzer);

    let mut index = InvertedIndex::new();
    index.build(&source, args.max_phrases)?;
    tracing::info!(
        docs = index.num_docs(),
        terms = index.num_terms(),
        "corpus indexed"
    );

    if let Some(raw) = args.query {
        let (_, qvec) = build_query_vector(&raw, analyzer);
        let results = retrieve(&index, &qvec)?;
        if args.json {
            let shown: Vec<_> = results.iter().take(args.top).collect();
            println!("{}", serde_json::to_string_pretty(&shown)?);
        } else {
            print_results(&mut std::io::stdout(), &results, args.top)?;
        }
        return Ok(());
    }

    let feedback = args.feedback.then(Feedback::default);
    let session = Session::new(&index, analyzer, feedback, args.top);
    let stdin = std::io::stdin();
    session.run(&mut stdin.lock(), &mut std::io::stdout())
}
