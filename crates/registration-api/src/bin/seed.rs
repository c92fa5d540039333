//! Fill the registrations table with demo data.

use anyhow::{bail, Context, Result};
use rand::{seq::SliceRandom, Rng};
use registration_api::{config::Config, telemetry};
use registration_store::{PassType, RegistrationDraft, Store};
use tracing::info;

const DEMO_COUNT: usize = 50;

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Doe", "Johnson", "Brown", "Williams", "Jones", "Garcia", "Miller",
];
const VARIANTS: &[&str] = &["A", "B"];

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    telemetry::init(&config.log);

    let Some(postgres) = config.database.postgres() else {
        bail!("DATABASE__URL must be set to seed demo data");
    };

    let store = Store::new(Some(postgres))
        .await
        .context("Failed to connect to the database")?;

    info!("Seeding {} demo registrations", DEMO_COUNT);

    let mut rng = rand::thread_rng();
    for _ in 0..DEMO_COUNT {
        let draft = demo_draft(&mut rng);
        let new = draft.validate().context("Generated an invalid demo registration")?;
        store.create(new).await?;
    }

    info!("Successfully added {} demo registrations", DEMO_COUNT);
    Ok(())
}

fn demo_draft(rng: &mut impl Rng) -> RegistrationDraft {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Jane");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let pass_type = PassType::ALL.choose(rng).copied().unwrap_or(PassType::Silver);
    let variant = VARIANTS.choose(rng).copied().unwrap_or("A");

    RegistrationDraft {
        full_name: Some(format!("{} {}", first, last)),
        email: Some(format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(1..=999)
        )),
        pass_type: Some(pass_type.as_str().to_string()),
        variant: Some(variant.to_string()),
    }
}
