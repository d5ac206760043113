use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use derma_core::{ConditionLabel, KnowledgeBase, SkinClassifier};

#[derive(Parser)]
#[command(name = "derma", about = "Derma skin analysis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a facial photo and print the diagnosis and routine
    Analyze {
        /// Path to the image file
        image: PathBuf,
        /// Path to the classifier ONNX model
        #[arg(long, default_value = "models/skin16_b0.onnx")]
        model: String,
        /// Print the raw JSON result instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Print the condition labels in model output order
    Labels,
    /// Print the product catalog
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { image, model, json } => {
            let photo = image::open(&image)
                .with_context(|| format!("failed to open image {}", image.display()))?;

            let mut classifier =
                SkinClassifier::load(&model).context("failed to load classifier model")?;
            let kb = KnowledgeBase::builtin();

            let result = derma_core::analyze(&mut classifier, &kb, &photo)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Diagnosis:");
                for entry in &result.diagnosis {
                    println!("  {:<12} {:.1}%", entry.condition, entry.confidence);
                }
                println!("Routine:");
                for step in &result.routine {
                    println!("  {:<14} {} ({})", step.step, step.product, step.why);
                }
                if !result.ingredients.is_empty() {
                    let names: Vec<_> = result.ingredients.iter().cloned().collect();
                    println!("Ingredients: {}", names.join(", "));
                }
            }
        }
        Commands::Labels => {
            for (i, label) in ConditionLabel::ALL.iter().enumerate() {
                println!("{i:>2}  {label}");
            }
        }
        Commands::Catalog => {
            let kb = KnowledgeBase::builtin();
            for product in kb.catalog() {
                let role = format!("{:?}", product.role);
                println!("{:<36} {role:<12} {}", product.name, product.ingredient);
            }
        }
    }

    Ok(())
}
