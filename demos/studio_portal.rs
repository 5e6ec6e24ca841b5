//! Walk through the studio portal against the in-memory store.
//!
//! Reads `GEMINI_API_KEY`, and optionally `SANORA_APP_ID` / `SANORA_AUTH_TOKEN`.

use dotenv::dotenv;
use futures::StreamExt;
use sanora_studio::studio::{Collection, MemoryAuth, MemoryStore, NewLead, NewProject};
use sanora_studio::{ApiKey, GeminiConfig, GenerationClient, Studio, StudioConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = GenerationClient::new(GeminiConfig::from_api_key(ApiKey::Default)?)?;
    let studio = Studio::new(
        MemoryStore::new(),
        MemoryAuth::new(),
        client,
        StudioConfig::from_env(),
    );

    let session = studio.sign_in().await?;
    println!("Signed in as {} (anonymous: {})", session.uid, session.anonymous);

    let mut projects = studio.projects().await?;
    if let Some(catalogue) = projects.next().await {
        println!("Showing {} projects:", catalogue.len());
        for project in &catalogue {
            println!("  {} - {}", project.name, project.location);
        }
    }

    let id = studio
        .add_project(NewProject {
            name: "Cedar Retreat".to_string(),
            location: "Oslo, NO".to_string(),
            image: "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0".to_string(),
        })
        .await?;

    if let Some(published) = projects.next().await {
        for project in &published {
            match studio.suggest_blurb(project).await {
                Ok(Some(blurb)) => println!("{}: \"{blurb}\"", project.name),
                Ok(None) => println!("{}: (no suggestion)", project.name),
                Err(e) => println!("{}: copy suggestion failed: {e}", project.name),
            }
        }
    }

    studio
        .submit_lead(NewLead {
            name: "Asha Rao".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
            message: Some("A calm reading room with olive accents".to_string()),
        })
        .await?;

    if let Some(leads) = studio.leads().await?.next().await {
        for lead in leads {
            println!("Lead: {} <{}> / {}", lead.name, lead.email, lead.phone);
        }
    }

    studio.delete(Collection::Projects, &id).await?;
    Ok(())
}
