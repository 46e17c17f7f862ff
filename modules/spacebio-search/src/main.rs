use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use ai_client::InterpreterClient;
use spacebio_common::{telemetry, Config};
use spacebio_search::{
    AiInterpreter, FieldDescriptor, FieldType, MemoryExecutor, Record, SchemaDescriptor,
    SchemaRegistry, SearchService,
};

/// Demo entry point: searches a small built-in space-biology study catalog.
/// Usage: `spacebio-search <prompt...>`
#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init("spacebio=info");

    info!("SpaceBio search starting...");

    let config = Config::from_env();
    let client = InterpreterClient::new(&config.ai_service_url)
        .with_timeout(Duration::from_secs(config.ai_timeout_secs))
        .with_health_timeout(Duration::from_secs(config.ai_health_timeout_secs));

    if let Err(e) = client.health().await {
        warn!(error = %e, "interpreter health probe failed, searches will degrade to keyword fallback");
    }

    let mut registry = SchemaRegistry::new();
    registry.register(study_schema());

    let service = SearchService::new(
        AiInterpreter::new(client),
        MemoryExecutor::new(sample_studies()),
        registry,
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        "recent mouse bone studies".to_string()
    } else {
        args.join(" ")
    };

    let response = service.search(&prompt, "Study").await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn study_schema() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "Study",
        vec![
            FieldDescriptor::new("title", FieldType::Text, "study title"),
            FieldDescriptor::new("organism", FieldType::Text, "species studied"),
            FieldDescriptor::new("assay", FieldType::Text, "assay technology used"),
            FieldDescriptor::new("year", FieldType::Number, "publication year"),
            FieldDescriptor::new("open_access", FieldType::Boolean, "full text freely available"),
        ],
    )
}

fn sample_studies() -> Vec<Record> {
    let rows = json!([
        {
            "title": "Bone density loss in mice after long-duration spaceflight",
            "organism": "Mus musculus",
            "assay": "micro-CT",
            "year": 2019,
            "open_access": true
        },
        {
            "title": "Arabidopsis root growth aboard the ISS",
            "organism": "Arabidopsis thaliana",
            "assay": "RNA-seq",
            "year": 2021,
            "open_access": true
        },
        {
            "title": "Radiation effects on murine bone marrow progenitors",
            "organism": "Mus musculus",
            "assay": "flow cytometry",
            "year": 2015,
            "open_access": false
        },
        {
            "title": "Microbial community shifts in spacecraft water systems",
            "organism": "Mixed culture",
            "assay": "16S sequencing",
            "year": 2022,
            "open_access": true
        }
    ]);

    rows.as_array()
        .expect("sample data is an array")
        .iter()
        .map(|v| v.as_object().expect("sample row is an object").clone())
        .collect()
}
