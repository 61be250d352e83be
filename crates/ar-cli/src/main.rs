use std::path::PathBuf;

use clap::Parser;

use ar_engine::logging::init_tracing_subscriber;
use ar_engine::matching::calculate_match_score;
use ar_engine::{
    Assessment, CatalogueError, RankedAssessment, RecommendationCriteria, RecommendationEngine,
};

#[derive(Debug, Parser)]
#[command(
    name = "ar-cli",
    about = "Recommend psychometric assessments from the product catalogue"
)]
struct Cli {
    /// Target job role (e.g. manager, sales, engineer)
    #[arg(long)]
    role: Option<String>,

    /// Required competencies (e.g. leadership communication)
    #[arg(long, num_args = 1..)]
    competencies: Option<Vec<String>>,

    /// Use case: hiring, development, promotion, coaching,
    /// succession_planning or team_building
    #[arg(long)]
    use_case: Option<String>,

    /// Assessment type: cognitive, personality, situational, motivation,
    /// development or feedback
    #[arg(long = "type")]
    assessment_type: Option<String>,

    /// Maximum duration in minutes
    #[arg(long)]
    max_duration: Option<u32>,

    /// Difficulty level: beginner, intermediate or advanced
    #[arg(long)]
    difficulty: Option<String>,

    /// Language code (e.g. en, es, fr)
    #[arg(long)]
    language: Option<String>,

    /// Assessment ids to exclude
    #[arg(long, num_args = 1..)]
    exclude: Option<Vec<String>>,

    /// Number of recommendations to return
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Show detailed information, including the score breakdown
    #[arg(long, short)]
    verbose: bool,

    /// Path to the product catalogue JSON file
    #[arg(
        long,
        env = "AR_CATALOGUE_PATH",
        default_value = "data/product_catalogue.json"
    )]
    catalogue: PathBuf,

    /// List all available assessments
    #[arg(long)]
    list_all: bool,

    /// Search assessments by name or description
    #[arg(long)]
    search: Option<String>,

    /// Show full details for a specific assessment id
    #[arg(long)]
    show: Option<String>,

    /// Recommend from free text or a pasted job description
    #[arg(long)]
    text: Option<String>,
}

fn main() {
    init_tracing_subscriber("ar-cli");

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CatalogueError> {
    let engine = RecommendationEngine::load(&cli.catalogue)?;

    if cli.list_all {
        list_all(&engine);
        return Ok(());
    }

    if let Some(term) = &cli.search {
        let hits = engine.search_by_name(term);
        println!("Search results for {term:?} ({} found):", hits.len());
        for assessment in hits {
            print_summary(assessment);
        }
        return Ok(());
    }

    if let Some(id) = &cli.show {
        match engine.get_by_id(id) {
            Some(assessment) => {
                // Full record as pretty JSON; the struct is the wire shape.
                println!(
                    "{}",
                    serde_json::to_string_pretty(assessment).unwrap_or_default()
                );
            }
            None => println!("Assessment {id:?} not found."),
        }
        return Ok(());
    }

    if let Some(text) = &cli.text {
        recommend_from_text(&engine, text, cli.top_n);
        return Ok(());
    }

    recommend_structured(&engine, &cli);
    Ok(())
}

fn list_all(engine: &RecommendationEngine) {
    let assessments = engine.get_all();
    println!("All available assessments ({}):", assessments.len());
    for assessment in assessments {
        print_summary(assessment);
    }
}

fn print_summary(assessment: &Assessment) {
    println!("\n{}: {}", assessment.id, assessment.name);
    println!(
        "  Type: {} | Duration: {}",
        assessment.assessment_type.as_deref().unwrap_or("-"),
        assessment
            .duration_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| "-".into()),
    );
}

fn recommend_structured(engine: &RecommendationEngine, cli: &Cli) {
    let criteria = RecommendationCriteria {
        target_role: cli.role.clone(),
        competencies: cli.competencies.clone(),
        use_case: cli.use_case.clone(),
        assessment_type: cli.assessment_type.clone(),
        max_duration_minutes: cli.max_duration,
        difficulty_level: cli.difficulty.clone(),
        language: cli.language.clone(),
        exclude_ids: cli.exclude.clone(),
    };

    let recommendations = engine.recommend(&criteria, cli.top_n);
    if recommendations.is_empty() {
        println!("No assessments found matching your criteria.");
        return;
    }

    println!("Found {} recommendation(s):", recommendations.len());
    for (rank, rec) in recommendations.iter().enumerate() {
        print_recommendation(rank + 1, rec);
        if cli.verbose {
            print_detail(&rec.assessment);
            print_breakdown(&rec.assessment, &criteria);
        }
    }
}

fn print_recommendation(rank: usize, rec: &RankedAssessment) {
    let a = &rec.assessment;
    println!("\n{rank}. {} ({})", a.name, a.id);
    println!("   Match Score: {}%", rec.match_score);
    println!(
        "   Type: {} | Category: {}",
        a.assessment_type.as_deref().unwrap_or("-"),
        a.category
    );
    println!(
        "   Duration: {} | Difficulty: {}",
        a.duration_minutes
            .map(|m| format!("{m} minutes"))
            .unwrap_or_else(|| "-".into()),
        a.difficulty_level.as_deref().unwrap_or("-"),
    );
}

fn print_detail(assessment: &Assessment) {
    println!(
        "   Description: {}",
        assessment.description.as_deref().unwrap_or("N/A")
    );
    println!("   Target Roles: {}", assessment.target_roles.join(", "));
    println!("   Competencies: {}", assessment.competencies.join(", "));
    println!("   Use Cases: {}", assessment.use_cases.join(", "));
    println!("   Languages: {}", assessment.languages.join(", "));
}

fn print_breakdown(assessment: &Assessment, criteria: &RecommendationCriteria) {
    let score = calculate_match_score(assessment, criteria);
    for (name, dim) in score.dimensions() {
        println!(
            "   {name}: {:.1}/{:.0} {} ({})",
            dim.awarded, dim.weight, dim.status, dim.details
        );
    }
}

fn recommend_from_text(engine: &RecommendationEngine, text: &str, top_n: usize) {
    let recommendations = engine.recommend_from_text(text, top_n);
    if recommendations.is_empty() {
        println!("No assessments found for the given text.");
        return;
    }

    println!("Found {} recommendation(s):", recommendations.len());
    for (rank, rec) in recommendations.iter().enumerate() {
        let a = &rec.assessment;
        println!("\n{}. {} ({})", rank + 1, a.name, a.id);
        println!("   Similarity: {:.4}", rec.similarity);
        if !a.url.is_empty() {
            println!("   URL: {}", a.url);
        }
    }
}
