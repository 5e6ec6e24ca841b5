//! Draft a design concept for a room brief passed on the command line.
//!
//! `RUST_LOG=sanora_studio=debug cargo run --example vision-concept -- "a quiet forest library"`

use dotenv::dotenv;
use sanora_studio::studio::prompts;
use sanora_studio::{ApiKey, GeminiConfig, GenerationClient, GenerationError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let brief = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let brief = if brief.trim().is_empty() {
        "A sun-drenched library with a view of the forest".to_string()
    } else {
        brief
    };

    let client = GenerationClient::new(GeminiConfig::from_api_key(ApiKey::Default)?)?;
    let prompt = prompts::vision_concept(&brief);

    match client
        .generate(&prompt.prompt, &prompt.system_instruction)
        .await
    {
        Ok(Some(concept)) => println!("{concept}"),
        Ok(None) => println!("The model returned no concept for this brief."),
        Err(GenerationError::Exhausted { attempts, last }) => {
            eprintln!("Vision Architect is unavailable after {attempts} attempts: {last}")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
